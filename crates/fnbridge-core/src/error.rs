//! Bridge error types.

use thiserror::Error;

/// Result type alias for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Errors that can occur while translating an invocation.
///
/// Request construction failures mean the routing layer handed over a
/// corrupt envelope. They abort the invocation; no outbound envelope is
/// produced for them.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("invalid request method: {0:?}")]
    InvalidMethod(String),

    #[error("invalid request target {uri:?}: {source}")]
    InvalidUri {
        uri: String,
        #[source]
        source: http::uri::InvalidUri,
    },

    #[error("malformed envelope: {0}")]
    Envelope(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    /// Whether the error was caused by a corrupt inbound envelope rather
    /// than local configuration or I/O.
    pub fn is_malformed_request(&self) -> bool {
        matches!(
            self,
            BridgeError::InvalidMethod(_)
                | BridgeError::InvalidUri { .. }
                | BridgeError::Envelope(_)
        )
    }
}
