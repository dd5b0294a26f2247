//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::ui_events::InputMode;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Send initial render state
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    self.state.handle_response(response);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }

        tracing::debug!("App actor stopped");
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Panel navigation
            UiEvent::NextPanel => self.state.next_panel(),
            UiEvent::PrevPanel => self.state.prev_panel(),
            UiEvent::ScrollUp => self.state.scroll_up(),
            UiEvent::ScrollDown => self.state.scroll_down(),

            // Input editing
            UiEvent::EditSearch => self.state.edit_search(),
            UiEvent::EditHost => self.state.edit_host(),
            UiEvent::EditFieldName => self.state.edit_field_name(),
            UiEvent::EditFieldValue => self.state.edit_field_value(),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),

            // Endpoint list
            UiEvent::NextEndpoint => self.state.next_endpoint(),
            UiEvent::PrevEndpoint => self.state.prev_endpoint(),
            UiEvent::SelectEndpoint => self.state.select_endpoint(),

            // Composer fields
            UiEvent::NextField => self.state.next_field(),
            UiEvent::PrevField => self.state.prev_field(),
            UiEvent::AddField(kind) => self.state.add_field(kind),
            UiEvent::RemoveField => self.state.remove_field(),
            UiEvent::DuplicateField => self.state.duplicate_field(),

            // Request
            UiEvent::Submit => {
                if self.state.input_mode == InputMode::Editing {
                    self.state.stop_editing();
                }
                if let Some(cmd) = self.state.prepare_request() {
                    let _ = self.network_tx.send(cmd);
                }
            }

            // Output tabs
            UiEvent::NextOutputTab => self.state.next_output_tab(),
            UiEvent::PrevOutputTab => self.state.prev_output_tab(),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),
            UiEvent::ToggleReadme => self.state.toggle_readme(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::catalog::{Catalog, EndpointDescriptor, ProjectInfo};

    #[tokio::test]
    async fn test_submit_reaches_network_and_quit_shuts_down() {
        let catalog = Catalog::new(
            ProjectInfo::default(),
            vec![EndpointDescriptor::new("get", "/health", "System", "Health")],
        );
        let mut state = AppState::new(Arc::new(catalog), "http://localhost:1");
        state.activate_endpoint(0);

        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (_net_resp_tx, net_rx) = mpsc::unbounded_channel();
        let (net_cmd_tx, mut net_cmd_rx) = mpsc::unbounded_channel();
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();

        let actor = AppActor::new(state, net_cmd_tx, render_tx);
        let handle = tokio::spawn(actor.run(ui_rx, net_rx));

        ui_tx.send(UiEvent::Submit).unwrap();
        ui_tx.send(UiEvent::Quit).unwrap();
        handle.await.unwrap();

        match net_cmd_rx.recv().await {
            Some(NetworkCommand::ExecuteRequest { request, .. }) => {
                assert_eq!(request.url(), "http://localhost:1/health");
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(matches!(net_cmd_rx.recv().await, Some(NetworkCommand::Shutdown)));

        // initial snapshot plus one per handled event before quit
        let mut snapshots = 0;
        while render_rx.try_recv().is_ok() {
            snapshots += 1;
        }
        assert_eq!(snapshots, 2);
    }
}
