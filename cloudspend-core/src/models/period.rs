//! Billing period types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A named, API-defined date range over which usage is billed and queried.
///
/// `name` is an opaque identifier used as the query key for usage listings.
/// Both boundary dates are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingPeriod {
    /// Opaque period identifier, e.g. `201809-1`.
    pub name: String,
    /// First day of the period (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the period (inclusive).
    pub end_date: NaiveDate,
}

impl BillingPeriod {
    /// Returns true if `date` falls inside this period's boundaries.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}
