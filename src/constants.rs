//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Application name
pub const APP_NAME: &str = "apiboard";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Endpoint records produced by apidoc
pub const API_DATA_FILE: &str = "api_data.json";

/// Project metadata produced by apidoc
pub const API_PROJECT_FILE: &str = "api_project.json";

/// Content type attached to every non-GET request
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Log file written next to the config (or in the working directory)
pub const LOG_FILE: &str = "apiboard.log";

/// Config file name inside the per-user config directory
pub const CONFIG_FILE: &str = "config.yaml";
