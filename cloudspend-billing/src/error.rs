//! Billing error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Error type for billing API operations.
#[derive(Debug, Error)]
pub enum BillingError {
    /// Credential acquisition or presentation failed. Fatal, never retried.
    #[error("Authorization failed: {0}")]
    Authorization(String),

    /// No billing period covers the requested date.
    #[error("No billing period covers {date}")]
    PeriodNotFound {
        /// The date that no period contains.
        date: NaiveDate,
    },

    /// HTTP request failed after any applicable retries.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Rate limited by the billing API and retries were exhausted.
    #[error("Rate limited, retry after {retry_after:?} seconds")]
    RateLimited {
        /// Seconds to wait before retrying, when the API said.
        retry_after: Option<u64>,
    },

    /// The billing API returned something the client cannot use.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
