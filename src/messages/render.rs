//! Render state - data structure sent from App layer to UI for rendering

use crate::messages::ui_events::InputMode;
use crate::models::{ActivityEntry, GifItem, View};

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    pub view: View,

    // Session
    /// Abbreviated session address
    pub address: Option<String>,
    /// Set once the startup check found no wallet
    pub wallet_missing: bool,

    // Gallery
    pub gifs: Vec<GifItem>,
    /// False until a read of the list has succeeded
    pub gifs_loaded: bool,
    pub gallery_scroll: u16,

    // Pending input
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // In-flight remote work
    pub is_connecting: bool,
    pub is_fetching: bool,
    pub is_writing: bool,

    pub activity: Vec<ActivityEntry>,

    // Popups
    pub show_help: bool,
}

impl RenderState {
    pub fn is_busy(&self) -> bool {
        self.is_connecting || self.is_fetching || self.is_writing
    }
}
