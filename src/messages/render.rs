//! Render state - data structure sent from App layer to UI for rendering

use std::sync::Arc;

use crate::catalog::{Catalog, EndpointDescriptor};
use crate::composer::Field;
use crate::messages::ui_events::{EditTarget, InputMode, OutputTab, Panel};
use crate::models::Response;

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // Catalog (shared, read-only)
    pub catalog: Arc<Catalog>,
    pub search: String,
    /// Catalog indices in listing order
    pub listing: Vec<usize>,
    /// Position in `listing`
    pub selected_endpoint: usize,
    pub active_endpoint: Option<usize>,

    // Composer
    pub host: String,
    /// Active fields in display order
    pub fields: Vec<Field>,
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
    pub call_text: String,
    pub curl_text: String,

    // Popups
    pub show_help: bool,
    pub show_readme: bool,
}

impl RenderState {
    pub fn endpoint(&self) -> Option<&EndpointDescriptor> {
        self.active_endpoint.and_then(|i| self.catalog.get(i))
    }

    /// Text of the active output tab
    pub fn output_text(&self) -> &str {
        match self.output_tab {
            OutputTab::Response => &self.response.body,
            OutputTab::Call => &self.call_text,
            OutputTab::Curl => &self.curl_text,
        }
    }
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            catalog: Arc::new(Catalog::default()),
            search: String::new(),
            listing: Vec::new(),
            selected_endpoint: 0,
            active_endpoint: None,
            host: String::new(),
            fields: Vec::new(),
            selected_field: 0,
            active_panel: Panel::Endpoints,
            input_mode: InputMode::Normal,
            edit_target: None,
            cursor_position: 0,
            output_tab: OutputTab::Response,
            response: Response::default(),
            response_scroll: 0,
            is_loading: false,
            call_text: String::new(),
            curl_text: String::new(),
            show_help: false,
            show_readme: false,
        }
    }
}
