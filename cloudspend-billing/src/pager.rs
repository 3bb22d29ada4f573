//! Paginated usage traversal.
//!
//! [`UsagePager`] walks one billing period's usage details page by page
//! through a [`BillingApi`]. The sequence is finite and consumed once; a
//! fetch failure at any point propagates immediately instead of yielding a
//! silently truncated result. Record ordering within and across pages is
//! whatever the remote returns and must be treated as opaque.

use chrono::NaiveDate;
use tracing::debug;

use cloudspend_core::UsageRecord;

use crate::api::BillingApi;
use crate::error::BillingError;

// ============================================================================
// Filter
// ============================================================================

/// Server-side restriction on the usage listing.
#[derive(Debug, Clone, Default)]
pub struct UsageFilter(Option<String>);

impl UsageFilter {
    /// No restriction: the whole billing period.
    pub fn none() -> Self {
        Self(None)
    }

    /// Restricts to rows whose `usageStart` equals `date`, the shape used
    /// when ingesting one day at a time.
    pub fn usage_start_on(date: NaiveDate) -> Self {
        Self(Some(format!(
            "properties/usageStart eq '{}'",
            date.format("%Y-%m-%d")
        )))
    }

    /// Returns the filter expression, if any.
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

// ============================================================================
// Pager
// ============================================================================

/// Cursor over the pages of one usage listing.
#[derive(Debug)]
pub struct UsagePager<'a, A: BillingApi + ?Sized> {
    api: &'a A,
    period_name: String,
    filter: UsageFilter,
    continuation: Option<String>,
    started: bool,
}

impl<'a, A: BillingApi + ?Sized> UsagePager<'a, A> {
    /// Creates a pager positioned before the first page.
    pub fn new(api: &'a A, period_name: impl Into<String>, filter: UsageFilter) -> Self {
        Self {
            api,
            period_name: period_name.into(),
            filter,
            continuation: None,
            started: false,
        }
    }

    /// True while at least one more page can be fetched.
    pub fn has_more(&self) -> bool {
        !self.started || self.continuation.is_some()
    }

    /// Fetches the next page of records. One remote call per invocation.
    ///
    /// Returns an empty vector once the listing is exhausted.
    ///
    /// # Errors
    ///
    /// Any [`BillingError`] from the page fetch. The pager must not be
    /// advanced again after an error.
    pub async fn advance(&mut self) -> Result<Vec<UsageRecord>, BillingError> {
        if !self.has_more() {
            return Ok(Vec::new());
        }

        let page = self
            .api
            .usage_page(
                &self.period_name,
                self.filter.as_deref(),
                self.continuation.as_deref(),
            )
            .await?;

        self.started = true;
        self.continuation = page.continuation;
        debug!(
            period = %self.period_name,
            records = page.records.len(),
            has_more = self.has_more(),
            "Advanced usage pager"
        );

        Ok(page.records)
    }

    /// Drains the whole listing into memory.
    ///
    /// # Errors
    ///
    /// The first [`BillingError`] from any page fetch; records from pages
    /// before the failure are discarded rather than returned partially.
    pub async fn collect_all(mut self) -> Result<Vec<UsageRecord>, BillingError> {
        let mut records = Vec::new();
        while self.has_more() {
            records.extend(self.advance().await?);
        }
        Ok(records)
    }
}
