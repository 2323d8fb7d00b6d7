use crate::store::StoreError;

/// Errors surfaced by the core to its callers.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// True for failures of the request itself, as opposed to cache defects.
    pub fn is_network_failure(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Api { .. } | Self::Decode(_))
    }
}

pub type Result<T, E = CoreError> = std::result::Result<T, E>;
