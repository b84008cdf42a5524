//! Command handlers - the session flow driven by UI events and remote responses
//!
//! Handlers never perform I/O. Anything that must reach the wallet or the
//! ledger is returned as a `RemoteCommand` for the actor to dispatch.

use crate::app::AppState;
use crate::messages::ui_events::InputMode;
use crate::messages::{RemoteCommand, RemoteResponse, WriteKind};
use crate::models::{ActivityLevel, GifList, View};
use crate::remote::FetchOutcome;

impl AppState {
    // ========================
    // Session
    // ========================

    /// Startup: passive wallet check that must not prompt
    pub fn boot(&mut self) -> RemoteCommand {
        self.connecting = true;
        self.log(ActivityLevel::Info, "Checking for wallet...");
        RemoteCommand::SilentConnect
    }

    /// User-requested connect
    pub fn connect_wallet(&mut self) -> Option<RemoteCommand> {
        if self.address.is_some() || self.connecting {
            return None;
        }
        self.connecting = true;
        self.log(ActivityLevel::Info, "Connecting to wallet...");
        Some(RemoteCommand::Connect)
    }

    // ========================
    // GIF list
    // ========================

    /// Queues a list read. Only one read is in flight; a request made while
    /// one is pending is coalesced into a single follow-up read.
    pub fn request_gif_list(&mut self) -> Option<RemoteCommand> {
        self.address.as_ref()?;
        if self.fetch_in_flight.is_some() {
            self.refetch_queued = true;
            return None;
        }
        let id = self.next_id();
        self.fetch_in_flight = Some(id);
        tracing::debug!(id, "Fetching GIF list");
        Some(RemoteCommand::FetchGifList { id })
    }

    pub fn refresh(&mut self) -> Option<RemoteCommand> {
        if self.address.is_none() {
            return None;
        }
        self.log(ActivityLevel::Info, "Refreshing GIF list...");
        self.request_gif_list()
    }

    /// One-time creation of the base account; only offered from the setup view
    pub fn initialize_account(&mut self) -> Option<RemoteCommand> {
        if self.view() != View::Setup {
            return None;
        }
        if self.write_in_flight.is_some() {
            self.log(ActivityLevel::Error, "A transaction is already pending");
            return None;
        }
        let id = self.next_id();
        self.write_in_flight = Some((id, WriteKind::Initialize));
        self.log(ActivityLevel::Info, "Initializing GIF program account...");
        Some(RemoteCommand::InitializeAccount { id })
    }

    /// Sends the pending input as a new GIF link
    pub fn submit_gif(&mut self) -> Option<RemoteCommand> {
        self.stop_editing();
        if self.view() != View::Gallery {
            return None;
        }
        let gif_link = self.input.trim().to_string();
        if gif_link.is_empty() {
            self.log(ActivityLevel::Error, "Empty input. Try again.");
            return None;
        }
        if self.write_in_flight.is_some() {
            self.log(ActivityLevel::Error, "A transaction is already pending");
            return None;
        }
        let id = self.next_id();
        self.write_in_flight = Some((id, WriteKind::SubmitGif));
        self.log(ActivityLevel::Info, format!("Sending GIF: {}", gif_link));
        Some(RemoteCommand::SubmitGif { id, gif_link })
    }

    // ========================
    // Remote responses
    // ========================

    /// Applies a remote response and returns any follow-up commands
    pub fn handle_response(&mut self, response: RemoteResponse) -> Vec<RemoteCommand> {
        let mut follow_up = Vec::new();

        match response {
            RemoteResponse::WalletMissing { silent } => {
                self.connecting = false;
                self.wallet_missing = true;
                let message = if silent {
                    "No wallet found. Create a keypair to connect."
                } else {
                    "Cannot connect: no wallet found"
                };
                self.log(ActivityLevel::Error, message);
            }

            RemoteResponse::Connected { address, silent } => {
                self.connecting = false;
                self.wallet_missing = false;
                if self.address.is_none() {
                    let how = if silent { "Reconnected" } else { "Connected" };
                    self.log(ActivityLevel::Success, format!("{} with address {}", how, address));
                    self.address = Some(address);
                    follow_up.extend(self.request_gif_list());
                }
            }

            RemoteResponse::ConnectFailed { message, silent } => {
                self.connecting = false;
                if silent {
                    self.log(ActivityLevel::Info, format!("No trusted session: {}", message));
                } else {
                    self.log(ActivityLevel::Error, format!("Connect failed: {}", message));
                }
            }

            RemoteResponse::GifListFetched { id, outcome } => {
                if self.fetch_in_flight != Some(id) {
                    tracing::debug!(id, "Discarding stale GIF list response");
                    return follow_up;
                }
                self.fetch_in_flight = None;
                self.apply_fetch_outcome(outcome);

                if self.refetch_queued {
                    self.refetch_queued = false;
                    follow_up.extend(self.request_gif_list());
                }
            }

            RemoteResponse::WriteConfirmed { id, kind, signature } => {
                if !self.take_write(id) {
                    return follow_up;
                }
                if kind == WriteKind::SubmitGif {
                    self.input.clear();
                    self.cursor_position = 0;
                }
                self.log(
                    ActivityLevel::Success,
                    format!("{} confirmed: {}", kind.label(), signature),
                );
                follow_up.extend(self.request_gif_list());
            }

            RemoteResponse::WriteFailed { id, kind, message } => {
                if !self.take_write(id) {
                    return follow_up;
                }
                self.log(ActivityLevel::Error, format!("{} failed: {}", kind.label(), message));
            }
        }

        follow_up
    }

    fn apply_fetch_outcome(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Found(items) => {
                self.log(ActivityLevel::Info, format!("Loaded {} GIFs", items.len()));
                let max_scroll = u16::try_from(items.len().saturating_sub(1)).unwrap_or(u16::MAX);
                self.gallery_scroll = self.gallery_scroll.min(max_scroll);
                self.gifs = GifList::Loaded(items);
            }
            FetchOutcome::NotFound => {
                self.log(ActivityLevel::Info, "GIF program account not initialized yet");
                self.gifs = GifList::AccountMissing;
            }
            FetchOutcome::TransientError(message) => {
                self.log(ActivityLevel::Error, format!("Could not load GIFs: {}", message));
            }
        }
    }

    /// Clears the in-flight write if `id` matches it
    fn take_write(&mut self, id: u64) -> bool {
        match self.write_in_flight {
            Some((pending, _)) if pending == id => {
                self.write_in_flight = None;
                true
            }
            _ => {
                tracing::debug!(id, "Discarding stale write response");
                false
            }
        }
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        if self.view() == View::Gallery {
            self.input_mode = InputMode::Editing;
            self.cursor_position = self.input.len();
        }
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position = self.input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.len() {
            self.cursor_position = self.input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(self.input.len());
        }
    }

    pub fn enter_char(&mut self, c: char) {
        if self.cursor_position <= self.input.len() {
            self.input.insert(self.cursor_position, c);
            self.cursor_position += c.len_utf8();
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let prev_pos = self.input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.input.remove(prev_pos);
            self.cursor_position = prev_pos;
        }
    }

    // ========================
    // Gallery scrolling
    // ========================

    pub fn scroll_up(&mut self) {
        self.gallery_scroll = self.gallery_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        if (self.gallery_scroll as usize) + 1 < self.gifs.items().len() {
            self.gallery_scroll = self.gallery_scroll.saturating_add(1);
        }
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GifItem;

    fn connected(address: &str) -> (AppState, u64) {
        let mut state = AppState::new();
        state.boot();
        let follow_up = state.handle_response(RemoteResponse::Connected {
            address: address.to_string(),
            silent: true,
        });
        let id = match follow_up.as_slice() {
            [RemoteCommand::FetchGifList { id }] => *id,
            other => panic!("expected a single fetch, got {:?}", other),
        };
        (state, id)
    }

    fn populated(links: &[&str]) -> AppState {
        let (mut state, id) = connected("Addr1");
        state.handle_response(RemoteResponse::GifListFetched {
            id,
            outcome: FetchOutcome::Found(links.iter().map(|l| GifItem::new(*l, "Addr1")).collect()),
        });
        state
    }

    fn type_text(state: &mut AppState, text: &str) {
        state.start_editing();
        for c in text.chars() {
            state.enter_char(c);
        }
    }

    #[test]
    fn test_missing_wallet_keeps_unconnected() {
        let mut state = AppState::new();
        assert_eq!(state.boot(), RemoteCommand::SilentConnect);

        let follow_up = state.handle_response(RemoteResponse::WalletMissing { silent: true });
        assert!(follow_up.is_empty());
        assert!(state.address.is_none());
        assert!(state.wallet_missing);
        assert_eq!(state.view(), View::Unconnected);
    }

    #[test]
    fn test_silent_connect_fetches_once() {
        let (mut state, _) = connected("Addr1");
        assert_eq!(state.address.as_deref(), Some("Addr1"));
        assert_eq!(state.view(), View::Gallery);

        // A repeated connect for an existing session triggers nothing
        let follow_up = state.handle_response(RemoteResponse::Connected {
            address: "Addr1".to_string(),
            silent: false,
        });
        assert!(follow_up.is_empty());
        assert!(!state.refetch_queued);
    }

    #[test]
    fn test_silent_failure_is_swallowed() {
        let mut state = AppState::new();
        state.boot();
        let follow_up = state.handle_response(RemoteResponse::ConnectFailed {
            message: "not trusted".to_string(),
            silent: true,
        });
        assert!(follow_up.is_empty());
        assert!(!state.connecting);
        assert_eq!(state.view(), View::Unconnected);
        assert_eq!(state.connect_wallet(), Some(RemoteCommand::Connect));
    }

    #[test]
    fn test_connect_ignored_while_connected_or_pending() {
        let mut state = AppState::new();
        assert!(state.connect_wallet().is_some());
        assert!(state.connect_wallet().is_none());

        let (mut state, _) = connected("Addr1");
        assert!(state.connect_wallet().is_none());
    }

    #[test]
    fn test_explicit_connect_then_not_found_shows_setup() {
        let mut state = AppState::new();
        state.boot();
        state.handle_response(RemoteResponse::WalletMissing { silent: true });
        assert_eq!(state.view(), View::Unconnected);

        assert_eq!(state.connect_wallet(), Some(RemoteCommand::Connect));
        let follow_up = state.handle_response(RemoteResponse::Connected {
            address: "Addr1".to_string(),
            silent: false,
        });
        let [RemoteCommand::FetchGifList { id }] = follow_up.as_slice() else {
            panic!("expected fetch");
        };

        state.handle_response(RemoteResponse::GifListFetched {
            id: *id,
            outcome: FetchOutcome::NotFound,
        });
        assert_eq!(state.gifs, GifList::AccountMissing);
        assert_eq!(state.view(), View::Setup);
        assert!(!state.to_render_state().wallet_missing);
    }

    #[test]
    fn test_transient_error_keeps_list() {
        let mut state = populated(&["https://x/1.gif"]);
        let before = state.gifs.clone();

        let Some(RemoteCommand::FetchGifList { id }) = state.refresh() else {
            panic!("expected fetch");
        };
        state.handle_response(RemoteResponse::GifListFetched {
            id,
            outcome: FetchOutcome::TransientError("timeout".to_string()),
        });
        assert_eq!(state.gifs, before);
        assert_eq!(state.view(), View::Gallery);
        assert!(state.fetch_in_flight.is_none());
    }

    #[test]
    fn test_failed_first_load_is_not_an_empty_gallery() {
        let (mut state, id) = connected("Addr1");
        state.handle_response(RemoteResponse::GifListFetched {
            id,
            outcome: FetchOutcome::TransientError("timeout".to_string()),
        });
        let render = state.to_render_state();
        assert_eq!(render.view, View::Gallery);
        assert!(!render.gifs_loaded);
        assert!(!render.is_fetching);

        let Some(RemoteCommand::FetchGifList { id }) = state.refresh() else {
            panic!("expected fetch");
        };
        state.handle_response(RemoteResponse::GifListFetched {
            id,
            outcome: FetchOutcome::Found(vec![]),
        });
        assert!(state.to_render_state().gifs_loaded);
    }

    #[test]
    fn test_fetch_is_single_flight() {
        let (mut state, first) = connected("Addr1");
        assert!(state.request_gif_list().is_none());
        assert!(state.request_gif_list().is_none());
        assert!(state.refetch_queued);

        let follow_up = state.handle_response(RemoteResponse::GifListFetched {
            id: first,
            outcome: FetchOutcome::Found(vec![]),
        });
        let [RemoteCommand::FetchGifList { id: second }] = follow_up.as_slice() else {
            panic!("expected one coalesced fetch");
        };
        assert_ne!(*second, first);
        assert!(!state.refetch_queued);
    }

    #[test]
    fn test_stale_fetch_response_discarded() {
        let (mut state, id) = connected("Addr1");
        state.handle_response(RemoteResponse::GifListFetched {
            id: id + 100,
            outcome: FetchOutcome::NotFound,
        });
        assert_eq!(state.gifs, GifList::NotLoaded);
        assert_eq!(state.fetch_in_flight, Some(id));
    }

    #[test]
    fn test_empty_submit_dispatches_nothing() {
        let mut state = populated(&["https://x/1.gif"]);
        let before = state.gifs.clone();

        assert!(state.submit_gif().is_none());
        type_text(&mut state, "   ");
        assert!(state.submit_gif().is_none());

        assert!(state.write_in_flight.is_none());
        assert_eq!(state.gifs, before);
    }

    #[test]
    fn test_submit_then_refetch_shows_both_in_order() {
        let mut state = populated(&["https://x/1.gif"]);
        type_text(&mut state, "https://x/2.gif");

        let Some(RemoteCommand::SubmitGif { id, gif_link }) = state.submit_gif() else {
            panic!("expected submit");
        };
        assert_eq!(gif_link, "https://x/2.gif");
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.submit_gif().is_none(), "second write refused while pending");

        let follow_up = state.handle_response(RemoteResponse::WriteConfirmed {
            id,
            kind: WriteKind::SubmitGif,
            signature: "sig".to_string(),
        });
        assert!(state.input.is_empty());
        let [RemoteCommand::FetchGifList { id: fetch }] = follow_up.as_slice() else {
            panic!("expected refetch");
        };

        state.handle_response(RemoteResponse::GifListFetched {
            id: *fetch,
            outcome: FetchOutcome::Found(vec![
                GifItem::new("https://x/1.gif", "Addr1"),
                GifItem::new("https://x/2.gif", "Addr1"),
            ]),
        });
        let render = state.to_render_state();
        let links: Vec<_> = render.gifs.iter().map(|g| g.gif_link.as_str()).collect();
        assert_eq!(links, ["https://x/1.gif", "https://x/2.gif"]);
    }

    #[test]
    fn test_failed_submit_keeps_input() {
        let mut state = populated(&[]);
        type_text(&mut state, "https://x/3.gif");
        let Some(RemoteCommand::SubmitGif { id, .. }) = state.submit_gif() else {
            panic!("expected submit");
        };

        let follow_up = state.handle_response(RemoteResponse::WriteFailed {
            id,
            kind: WriteKind::SubmitGif,
            message: "rejected".to_string(),
        });
        assert!(follow_up.is_empty());
        assert_eq!(state.input, "https://x/3.gif");
        assert!(state.write_in_flight.is_none());
    }

    #[test]
    fn test_initialize_only_from_setup() {
        let mut state = populated(&[]);
        assert!(state.initialize_account().is_none());

        let (mut state, id) = connected("Addr1");
        state.handle_response(RemoteResponse::GifListFetched {
            id,
            outcome: FetchOutcome::NotFound,
        });
        assert!(state.submit_gif().is_none());
        let Some(RemoteCommand::InitializeAccount { id }) = state.initialize_account() else {
            panic!("expected init");
        };

        let follow_up = state.handle_response(RemoteResponse::WriteConfirmed {
            id,
            kind: WriteKind::Initialize,
            signature: "sig".to_string(),
        });
        assert!(matches!(follow_up.as_slice(), [RemoteCommand::FetchGifList { .. }]));
    }

    #[test]
    fn test_cursor_editing_is_char_safe() {
        let mut state = populated(&[]);
        type_text(&mut state, "añb");
        state.move_cursor_left();
        state.move_cursor_left();
        state.delete_char();
        assert_eq!(state.input, "ñb");
        state.move_cursor_right();
        state.enter_char('x');
        assert_eq!(state.input, "ñxb");
        assert_eq!(state.to_render_state().cursor_position, 2);
    }

    #[test]
    fn test_activity_log_is_bounded() {
        let mut state = AppState::new();
        for i in 0..(crate::constants::MAX_ACTIVITY + 10) {
            state.log(ActivityLevel::Info, format!("event {}", i));
        }
        assert_eq!(state.activity.len(), crate::constants::MAX_ACTIVITY);
        assert!(state.activity[0].message.ends_with(&format!("{}", crate::constants::MAX_ACTIVITY + 9)));
    }
}
