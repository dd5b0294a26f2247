//! App state - pure data structure with no I/O logic

use std::sync::Arc;

use crate::catalog::{Catalog, EndpointDescriptor};
use crate::composer::{Field, FieldSet};
use crate::messages::ui_events::{EditTarget, InputMode, OutputTab, Panel};
use crate::messages::RenderState;
use crate::models::Response;

/// Main application state - pure data, no I/O
pub struct AppState {
    // Catalog (injected, never mutated)
    pub catalog: Arc<Catalog>,
    pub search: String,
    pub listing: Vec<usize>,
    pub selected_endpoint: usize,
    pub active_endpoint: Option<usize>,

    // Composer
    pub host: String,
    pub fields: FieldSet,
    pub selected_field: usize,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub edit_target: Option<EditTarget>,
    pub cursor_position: usize,

    // Output
    pub output_tab: OutputTab,
    pub response: Response,
    pub response_scroll: u16,
    pub is_loading: bool,
    pub next_request_id: u64,
    pub pending_request_id: Option<u64>,
    pub call_text: String,
    pub curl_text: String,

    // Popups
    pub show_help: bool,
    pub show_readme: bool,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>, host: impl Into<String>) -> Self {
        let listing = catalog.listing("");
        AppState {
            catalog,
            search: String::new(),
            listing,
            selected_endpoint: 0,
            active_endpoint: None,
            host: host.into(),
            fields: FieldSet::new(),
            selected_field: 0,
            active_panel: Panel::Endpoints,
            input_mode: InputMode::Normal,
            edit_target: None,
            cursor_position: 0,
            output_tab: OutputTab::Response,
            response: Response::default(),
            response_scroll: 0,
            is_loading: false,
            next_request_id: 1,
            pending_request_id: None,
            call_text: String::new(),
            curl_text: String::new(),
            show_help: false,
            show_readme: false,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn endpoint(&self) -> Option<&EndpointDescriptor> {
        self.active_endpoint.and_then(|i| self.catalog.get(i))
    }

    /// Field under the composer cursor
    pub fn selected_field(&self) -> Option<&Field> {
        self.fields.ordered().get(self.selected_field).copied()
    }

    /// Get the current input field content
    pub fn current_input(&self) -> String {
        match self.edit_target {
            Some(EditTarget::Search) => self.search.clone(),
            Some(EditTarget::Host) => self.host.clone(),
            Some(EditTarget::FieldName(id)) => {
                self.fields.get(id).map(|f| f.name.clone()).unwrap_or_default()
            }
            Some(EditTarget::FieldValue(id)) => {
                self.fields.get(id).map(|f| f.value.clone()).unwrap_or_default()
            }
            None => String::new(),
        }
    }

    /// Write edited text back to its owner. Field edits go through the
    /// FieldSet operations so unknown ids stay no-ops.
    pub fn apply_input(&mut self, text: String) {
        match self.edit_target {
            Some(EditTarget::Search) => {
                self.search = text;
                self.listing = self.catalog.listing(&self.search);
                self.selected_endpoint = 0;
            }
            Some(EditTarget::Host) => self.host = text,
            Some(EditTarget::FieldName(id)) => self.fields.rename(id, text),
            Some(EditTarget::FieldValue(id)) => self.fields.set_value(id, text),
            None => {}
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            catalog: Arc::clone(&self.catalog),
            search: self.search.clone(),
            listing: self.listing.clone(),
            selected_endpoint: self.selected_endpoint,
            active_endpoint: self.active_endpoint,
            host: self.host.clone(),
            fields: self.fields.ordered().into_iter().cloned().collect(),
            selected_field: self.selected_field,
            active_panel: self.active_panel,
            input_mode: self.input_mode,
            edit_target: self.edit_target,
            cursor_position: self.cursor_position,
            output_tab: self.output_tab,
            response: self.response.clone(),
            response_scroll: self.response_scroll,
            is_loading: self.is_loading,
            call_text: self.call_text.clone(),
            curl_text: self.curl_text.clone(),
            show_help: self.show_help,
            show_readme: self.show_readme,
        }
    }
}
