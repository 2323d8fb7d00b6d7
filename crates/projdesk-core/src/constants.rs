//! Application-wide constants
//!
//! Endpoint paths and defaults shared by the HTTP client, the config layer
//! and the filter gate.

/// Default REST backend
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// Quiescence period of the filter debounce gate
pub const FILTER_DEBOUNCE_MS: u64 = 300;

/// Default per-request timeout
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Environment overrides for the config file
pub const ENV_API_URL: &str = "PROJDESK_API_URL";
pub const ENV_AUTH_TOKEN: &str = "PROJDESK_TOKEN";
pub const ENV_LOG_FILE: &str = "PROJDESK_LOG_FILE";

// REST endpoints, relative to the base URL
pub mod endpoints {
    pub const PROJECTS: &str = "/projects";
    pub const PROJECT_CREATE: &str = "/projects/create";
    pub const NOTE_CREATE: &str = "/notes/create";
    pub const NOTES: &str = "/notes";
    pub const FILE_CREATE: &str = "/files/create";
    pub const FILES: &str = "/files";
    /// Exchanges a storage key for a temporary download URL
    pub const FILE_SIGNED_URL: &str = "/files/get-signed-url";
}
