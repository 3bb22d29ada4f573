//! Run reports.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::IngestError;

/// Outcome of one successfully ingested day.
#[derive(Debug, Clone)]
pub struct DaySummary {
    /// The ingested date.
    pub date: NaiveDate,
    /// Name of the billing period the date resolved to.
    pub period: String,
    /// Number of usage records pulled.
    pub records: usize,
    /// Number of aggregate buckets written.
    pub buckets: usize,
    /// Sum over all buckets. Only a meaningful amount when the day's
    /// records share one currency.
    pub total: Decimal,
}

/// Outcome of one failed day.
#[derive(Debug)]
pub struct DayFailure {
    /// The date that failed.
    pub date: NaiveDate,
    /// What went wrong.
    pub error: IngestError,
}

/// Collected outcomes of one ingestion run.
///
/// Successes and failures are kept apart so a backfill can be re-run for
/// just the failed dates.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Days that were ingested and written.
    pub succeeded: Vec<DaySummary>,
    /// Days that failed, in processing order.
    pub failed: Vec<DayFailure>,
}

impl IngestReport {
    /// Total number of days the run attempted.
    pub fn days_attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// True when no day failed.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    /// True when every attempted day failed.
    pub fn all_failed(&self) -> bool {
        self.succeeded.is_empty() && !self.failed.is_empty()
    }
}
