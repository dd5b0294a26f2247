//! Command handlers - business logic for processing UI events

use crate::app::AppState;
use crate::composer::{self, FieldKind};
use crate::messages::ui_events::{EditTarget, InputMode, Panel};
use crate::messages::{NetworkCommand, NetworkResponse};

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn next_panel(&mut self) {
        self.active_panel = self.active_panel.next();
    }

    pub fn prev_panel(&mut self) {
        self.active_panel = self.active_panel.prev();
    }

    pub fn next_output_tab(&mut self) {
        self.output_tab = self.output_tab.next();
        self.response_scroll = 0;
    }

    pub fn prev_output_tab(&mut self) {
        self.output_tab = self.output_tab.prev();
        self.response_scroll = 0;
    }

    pub fn scroll_up(&mut self) {
        self.response_scroll = self.response_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.response_scroll = self.response_scroll.saturating_add(1);
    }

    // ========================
    // Input editing
    // ========================

    fn start_editing(&mut self, target: EditTarget) {
        self.edit_target = Some(target);
        self.input_mode = InputMode::Editing;
        self.cursor_position = self.current_input().len();
    }

    pub fn edit_search(&mut self) {
        self.active_panel = Panel::Endpoints;
        self.start_editing(EditTarget::Search);
    }

    pub fn edit_host(&mut self) {
        self.active_panel = Panel::Composer;
        self.start_editing(EditTarget::Host);
    }

    pub fn edit_field_name(&mut self) {
        if let Some(id) = self.selected_field().map(|f| f.id) {
            self.start_editing(EditTarget::FieldName(id));
        }
    }

    pub fn edit_field_value(&mut self) {
        if let Some(id) = self.selected_field().map(|f| f.id) {
            self.start_editing(EditTarget::FieldValue(id));
        }
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
        self.edit_target = None;
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.current_input();
        if self.cursor_position > 0 {
            let new_pos = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.current_input();
        if self.cursor_position < input.len() {
            let new_pos = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let mut input = self.current_input();
        let cursor_pos = self.cursor_position.min(input.len());
        input.insert(cursor_pos, c);
        self.cursor_position = cursor_pos + c.len_utf8();
        self.apply_input(input);
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        let mut input = self.current_input();
        let cursor_pos = self.cursor_position.min(input.len());
        let prev_pos = input[..cursor_pos]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        input.remove(prev_pos);
        self.cursor_position = prev_pos;
        self.apply_input(input);
    }

    // ========================
    // Endpoints
    // ========================

    pub fn next_endpoint(&mut self) {
        if !self.listing.is_empty() {
            self.selected_endpoint = (self.selected_endpoint + 1) % self.listing.len();
        }
    }

    pub fn prev_endpoint(&mut self) {
        if !self.listing.is_empty() {
            self.selected_endpoint = self
                .selected_endpoint
                .checked_sub(1)
                .unwrap_or(self.listing.len() - 1);
        }
    }

    pub fn select_endpoint(&mut self) {
        if let Some(&index) = self.listing.get(self.selected_endpoint) {
            self.activate_endpoint(index);
            self.active_panel = Panel::Composer;
        }
    }

    /// Make `index` the active endpoint and reseed the composer
    pub fn activate_endpoint(&mut self, index: usize) {
        let catalog = self.catalog.clone();
        let Some(endpoint) = catalog.get(index) else {
            return;
        };

        self.active_endpoint = Some(index);
        self.fields.seed(endpoint);
        self.selected_field = 0;
        if let Some(pos) = self.listing.iter().position(|&i| i == index) {
            self.selected_endpoint = pos;
        }

        self.response.body = format!(
            "Loaded: {} {}\n\nFill the fields and press 's' to submit.",
            endpoint.method.to_uppercase(),
            endpoint.url
        );
        self.response.status_code = None;
        self.response.time_ms = 0;
        self.call_text.clear();
        self.curl_text.clear();
        // An in-flight submit belongs to the previous endpoint
        if let Some(previous) = self.pending_request_id.take() {
            tracing::debug!(previous, "Abandoning in-flight request on endpoint change");
        }
        self.is_loading = false;
        tracing::info!(group = %endpoint.group, name = %endpoint.name, "Endpoint selected");
    }

    // ========================
    // Fields
    // ========================

    pub fn next_field(&mut self) {
        let len = self.fields.len();
        if len > 0 {
            self.selected_field = (self.selected_field + 1) % len;
        }
    }

    pub fn prev_field(&mut self) {
        let len = self.fields.len();
        if len > 0 {
            self.selected_field = self.selected_field.checked_sub(1).unwrap_or(len - 1);
        }
    }

    pub fn add_field(&mut self, kind: FieldKind) {
        let id = self.fields.add(kind);
        self.select_field_id(id);
        self.start_editing(EditTarget::FieldName(id));
    }

    pub fn remove_field(&mut self) {
        if let Some(id) = self.selected_field().map(|f| f.id) {
            self.fields.remove(id);
            let len = self.fields.len();
            if self.selected_field >= len {
                self.selected_field = len.saturating_sub(1);
            }
        }
    }

    pub fn duplicate_field(&mut self) {
        if let Some(id) = self.selected_field().map(|f| f.id) {
            if let Some(copy) = self.fields.duplicate(id) {
                self.select_field_id(copy);
            }
        }
    }

    fn select_field_id(&mut self, id: composer::FieldId) {
        if let Some(pos) = self.fields.ordered().iter().position(|f| f.id == id) {
            self.selected_field = pos;
        }
    }

    // ========================
    // Request sending
    // ========================

    /// Compose the current fields into a descriptor, render both text forms
    /// from it and hand it to the network layer. A submit made while another
    /// is in flight supersedes it.
    pub fn prepare_request(&mut self) -> Option<NetworkCommand> {
        let endpoint = self.endpoint()?;
        let method = endpoint.execution_method();
        let descriptor = composer::compose(&self.host, method, &endpoint.url, &self.fields);

        self.call_text = composer::to_call(&descriptor);
        self.curl_text = composer::to_curl(&descriptor);

        if let Some(previous) = self.pending_request_id {
            tracing::debug!(previous, "Superseding in-flight request");
        }

        self.is_loading = true;
        self.response.body = String::from("Loading...");
        self.response.status_code = None;
        self.response_scroll = 0;

        let id = self.next_id();
        self.pending_request_id = Some(id);

        Some(NetworkCommand::ExecuteRequest {
            id,
            request: descriptor,
        })
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        if self.pending_request_id != Some(response.id()) {
            tracing::debug!(id = response.id(), "Dropping stale response");
            return;
        }

        match response {
            NetworkResponse::Success { status, body, time_ms, .. } => {
                self.response.status_code = Some(status);
                self.response.body = body;
                self.response.time_ms = time_ms;
            }
            NetworkResponse::Error { status, message, time_ms, .. } => {
                self.response.status_code = status;
                self.response.body = message;
                self.response.time_ms = time_ms;
            }
        }

        self.is_loading = false;
        self.pending_request_id = None;
        self.response_scroll = 0;
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    pub fn toggle_readme(&mut self) {
        self.show_readme = !self.show_readme;
    }
}
