//! # apiboard
//!
//! A terminal browser for apidoc-generated API catalogs with a built-in
//! request composer.
//!
//! ## Features
//! - Grouped, searchable endpoint list with parameter/response documentation
//! - Editable header/query/body fields seeded from the selected endpoint
//! - `:param` path templating from the field values
//! - Request execution with status, timing and JSON highlighting
//! - The same request rendered as an axios call and as a curl command
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod models;
pub mod constants;
pub mod config;
pub mod catalog;
pub mod composer;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use models::{HttpMethod, Response};
pub use catalog::{load_catalog, Catalog, EndpointDescriptor, ProjectInfo};
pub use composer::{compose, to_call, to_curl, FieldKind, FieldSet, RequestDescriptor};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::NetworkActor;
