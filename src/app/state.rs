//! App state - pure data structure with no I/O logic

use std::collections::VecDeque;

use crate::constants::MAX_ACTIVITY;
use crate::messages::ui_events::InputMode;
use crate::messages::{RenderState, WriteKind};
use crate::models::{abbreviate_address, ActivityEntry, ActivityLevel, GifList, View};

/// Main application state - pure data, no I/O
pub struct AppState {
    // Session
    pub address: Option<String>,
    pub wallet_missing: bool,

    // Remote list
    pub gifs: GifList,
    pub gallery_scroll: u16,

    // Pending input (cursor is a byte offset)
    pub input: String,
    pub cursor_position: usize,
    pub input_mode: InputMode,

    // In-flight remote work
    pub next_request_id: u64,
    pub connecting: bool,
    pub fetch_in_flight: Option<u64>,
    /// A fetch was requested while another was in flight
    pub refetch_queued: bool,
    pub write_in_flight: Option<(u64, WriteKind)>,

    // Activity log, newest first
    pub activity: VecDeque<ActivityEntry>,

    // Popups
    pub show_help: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            address: None,
            wallet_missing: false,
            gifs: GifList::NotLoaded,
            gallery_scroll: 0,
            input: String::new(),
            cursor_position: 0,
            input_mode: InputMode::Normal,
            next_request_id: 1,
            connecting: false,
            fetch_in_flight: None,
            refetch_queued: false,
            write_in_flight: None,
            activity: VecDeque::with_capacity(MAX_ACTIVITY),
            show_help: false,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Panel to show, derived from session and list state
    pub fn view(&self) -> View {
        View::derive(self.address.as_deref(), &self.gifs)
    }

    /// Append to the activity log and mirror it to the tracing log
    pub fn log(&mut self, level: ActivityLevel, message: impl Into<String>) {
        let entry = ActivityEntry::new(level, message);
        match level {
            ActivityLevel::Error => tracing::warn!("{}", entry.message),
            ActivityLevel::Info | ActivityLevel::Success => tracing::info!("{}", entry.message),
        }
        if self.activity.len() >= MAX_ACTIVITY {
            self.activity.pop_back();
        }
        self.activity.push_front(entry);
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            view: self.view(),
            address: self.address.as_deref().map(abbreviate_address),
            wallet_missing: self.wallet_missing,
            gifs: self.gifs.items().to_vec(),
            gifs_loaded: !matches!(self.gifs, GifList::NotLoaded),
            gallery_scroll: self.gallery_scroll,
            input: self.input.clone(),
            input_mode: self.input_mode,
            cursor_position: self.input[..self.cursor_position].chars().count(),
            is_connecting: self.connecting,
            is_fetching: self.fetch_in_flight.is_some(),
            is_writing: self.write_in_flight.is_some(),
            activity: self.activity.iter().cloned().collect(),
            show_help: self.show_help,
        }
    }
}
