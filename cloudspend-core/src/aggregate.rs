//! Per-provider cost aggregation.
//!
//! Accumulates pretax cost per provider label with exact decimal
//! arithmetic. Accumulation is order-independent: the total for a given
//! record sequence is the same regardless of the order records arrive in,
//! which lets the pager's opaque remote ordering stay opaque.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::classify::classify;
use crate::error::ClassifyError;
use crate::models::{ProviderLabel, UsageRecord};

// ============================================================================
// Grouping Policy
// ============================================================================

/// How aggregate sums are keyed.
///
/// The billing API can emit records in more than one currency within a
/// single period. Summing across currencies produces a number with no
/// meaningful unit, so the default keeps currencies apart; `ByProvider`
/// reproduces the historical single-key behavior for callers that want it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingPolicy {
    /// Key by provider label only, conflating currencies.
    ByProvider,
    /// Key by provider label and currency (default).
    #[default]
    ByProviderAndCurrency,
}

// ============================================================================
// Aggregate Key
// ============================================================================

/// Grouping key for one aggregate bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AggregateKey {
    /// Provider label the bucket belongs to.
    pub provider: ProviderLabel,
    /// Currency of the bucket, `None` under [`GroupingPolicy::ByProvider`].
    pub currency: Option<String>,
}

impl fmt::Display for AggregateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.currency {
            Some(currency) => write!(f, "{} [{}]", self.provider, currency),
            None => write!(f, "{}", self.provider),
        }
    }
}

// ============================================================================
// Cost Aggregate
// ============================================================================

/// Per-provider accumulated cost totals for one batch of records.
///
/// One aggregate lives for exactly one aggregation pass (one day or one
/// period); it is reported and discarded at the end of the pass.
#[derive(Debug, Clone, Default)]
pub struct CostAggregate {
    policy: GroupingPolicy,
    totals: HashMap<AggregateKey, Decimal>,
}

impl CostAggregate {
    /// Creates an empty aggregate with the default grouping policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty aggregate with an explicit grouping policy.
    pub fn with_policy(policy: GroupingPolicy) -> Self {
        Self {
            policy,
            totals: HashMap::new(),
        }
    }

    /// Returns the grouping policy of this aggregate.
    pub fn policy(&self) -> GroupingPolicy {
        self.policy
    }

    /// Classifies one record and adds its cost to the matching bucket.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError`] when the record's instance identifier is
    /// malformed; the aggregate is left unchanged in that case.
    pub fn add(&mut self, record: &UsageRecord) -> Result<(), ClassifyError> {
        let provider = classify(&record.instance_id)?;
        let key = self.key_for(provider, &record.currency);
        let entry = self.totals.entry(key).or_insert(Decimal::ZERO);
        *entry += record.pretax_cost;
        Ok(())
    }

    /// Folds a whole record sequence into the aggregate.
    ///
    /// Stops at the first malformed record; no record before the failure
    /// is lost and none after it is consumed.
    ///
    /// # Errors
    ///
    /// Returns the first [`ClassifyError`] encountered.
    pub fn accumulate<'a, I>(&mut self, records: I) -> Result<(), ClassifyError>
    where
        I: IntoIterator<Item = &'a UsageRecord>,
    {
        for record in records {
            self.add(record)?;
        }
        Ok(())
    }

    /// Returns the accumulated total for a bucket, if present.
    pub fn total(&self, key: &AggregateKey) -> Option<Decimal> {
        self.totals.get(key).copied()
    }

    /// Returns the sum of all buckets.
    ///
    /// Only a meaningful amount when all buckets share one currency.
    pub fn grand_total(&self) -> Decimal {
        self.totals.values().copied().sum()
    }

    /// Iterates over `(key, total)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&AggregateKey, Decimal)> {
        self.totals.iter().map(|(k, v)| (k, *v))
    }

    /// Returns `(key, total)` pairs sorted by key, for stable reporting.
    pub fn sorted_entries(&self) -> Vec<(&AggregateKey, Decimal)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// True when nothing has been accumulated.
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    fn key_for(&self, provider: ProviderLabel, currency: &str) -> AggregateKey {
        let currency = match self.policy {
            GroupingPolicy::ByProvider => None,
            GroupingPolicy::ByProviderAndCurrency => Some(currency.to_string()),
        };
        AggregateKey { provider, currency }
    }
}
