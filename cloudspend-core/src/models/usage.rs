//! Usage line item types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One billed line item of consumption.
///
/// Records are built by the billing crate from transport responses and are
/// never mutated afterwards; the pipeline classifies and aggregates them,
/// then discards them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Hierarchical resource identifier, e.g.
    /// `/subscriptions/{id}/resourceGroups/{name}/providers/{namespace}/{type}/{resource}`.
    pub instance_id: String,
    /// Pretax cost of this line item. Exact decimal, non-negative in
    /// practice (the API has been seen emitting zero-cost rows).
    pub pretax_cost: Decimal,
    /// ISO currency code, e.g. `EUR` or `USD`.
    pub currency: String,
    /// Start of the usage window covered by this item.
    pub usage_start: DateTime<Utc>,
    /// End of the usage window. `usage_start <= usage_end`.
    pub usage_end: DateTime<Utc>,
    /// Whether the cost is an estimate. Not used downstream yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_estimated: Option<bool>,
}

impl UsageRecord {
    /// Returns true if the usage window is internally consistent.
    pub fn has_valid_window(&self) -> bool {
        self.usage_start <= self.usage_end
    }
}
