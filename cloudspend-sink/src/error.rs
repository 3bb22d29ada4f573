//! Sink error types.

use thiserror::Error;

/// Error type for time-series sink operations.
#[derive(Debug, Error)]
pub enum SinkError {
    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The database rejected the write.
    #[error("Write rejected with status {status}: {body}")]
    WriteRejected {
        /// HTTP status code of the rejection.
        status: u16,
        /// Response body, usually a JSON error message.
        body: String,
    },

    /// Sink configuration is unusable.
    #[error("Invalid sink configuration: {0}")]
    InvalidConfig(String),
}
