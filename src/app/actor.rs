//! App actor - message loop processing UI events and remote responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{RemoteCommand, RemoteResponse, RenderState, UiEvent};

/// App actor that processes UI events and remote responses
pub struct AppActor {
    state: AppState,
    remote_tx: mpsc::UnboundedSender<RemoteCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        remote_tx: mpsc::UnboundedSender<RemoteCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(),
            remote_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut remote_rx: mpsc::UnboundedReceiver<RemoteResponse>,
    ) {
        let boot = self.state.boot();
        self.dispatch(Some(boot));
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.remote_tx.send(RemoteCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = remote_rx.recv() => {
                    let follow_up = self.state.handle_response(response);
                    self.dispatch(follow_up);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    fn dispatch(&self, commands: impl IntoIterator<Item = RemoteCommand>) {
        for cmd in commands {
            let _ = self.remote_tx.send(cmd);
        }
    }

    /// Handle a UI event, returns true if should quit
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Session actions
            UiEvent::Connect => {
                let cmd = self.state.connect_wallet();
                self.dispatch(cmd);
            }
            UiEvent::InitializeAccount => {
                let cmd = self.state.initialize_account();
                self.dispatch(cmd);
            }
            UiEvent::SubmitGif => {
                let cmd = self.state.submit_gif();
                self.dispatch(cmd);
            }
            UiEvent::Refresh => {
                let cmd = self.state.refresh();
                self.dispatch(cmd);
            }

            // Input editing
            UiEvent::StartEditing => self.state.start_editing(),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),

            // Gallery
            UiEvent::ScrollUp => self.state.scroll_up(),
            UiEvent::ScrollDown => self.state.scroll_down(),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}
