//! Ingestion error types.

use thiserror::Error;

use cloudspend_billing::BillingError;
use cloudspend_core::ClassifyError;
use cloudspend_sink::SinkError;

/// Error type for one day of ingestion.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Billing API failure (period resolution or page fetch).
    #[error("Billing error: {0}")]
    Billing(#[from] BillingError),

    /// Sink write failure.
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    /// A record carried a malformed instance identifier.
    #[error("Classification error: {0}")]
    Classify(#[from] ClassifyError),
}

impl IngestError {
    /// True when the error is an authorization failure, which no later
    /// day can recover from.
    pub fn is_authorization(&self) -> bool {
        matches!(self, IngestError::Billing(BillingError::Authorization(_)))
    }
}
