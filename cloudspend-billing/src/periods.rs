//! Billing period resolution.
//!
//! Maps a calendar date to the billing period containing it. The remote
//! listing is narrowed server-side with an end-date filter, but the period
//! is selected by explicit range containment rather than by trusting the
//! API's reverse-chronological ordering.

use chrono::NaiveDate;
use tracing::debug;

use cloudspend_core::BillingPeriod;

use crate::api::BillingApi;
use crate::error::BillingError;

/// Builds the server-side filter selecting periods ending on or after
/// `date`. `ge`, not `gt`: period end dates are inclusive, so a period
/// ending exactly on `date` still contains it and must not be filtered
/// away before the containment check.
pub fn end_date_filter(date: NaiveDate) -> String {
    format!("billingPeriodEndDate ge {}", date.format("%Y-%m-%d"))
}

/// Resolves the billing period that contains `date`.
///
/// # Errors
///
/// Returns [`BillingError::PeriodNotFound`] when no listed period contains
/// the date (e.g. a future date beyond billed periods), or any transport
/// error from the listing itself.
pub async fn resolve_period<A: BillingApi + ?Sized>(
    api: &A,
    date: NaiveDate,
) -> Result<BillingPeriod, BillingError> {
    let filter = end_date_filter(date);
    let periods = api.list_periods(&filter).await?;
    debug!(date = %date, candidates = periods.len(), "Resolving billing period");

    periods
        .into_iter()
        .find(|period| period.contains(date))
        .ok_or(BillingError::PeriodNotFound { date })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::UsagePage;
    use async_trait::async_trait;

    /// Fake listing that applies the end-date filter the way the remote
    /// does, so the tests exercise the same narrowing the real API
    /// performs before containment is checked.
    struct FixedPeriods(Vec<BillingPeriod>);

    #[async_trait]
    impl BillingApi for FixedPeriods {
        async fn list_periods(&self, filter: &str) -> Result<Vec<BillingPeriod>, BillingError> {
            let date = filter
                .strip_prefix("billingPeriodEndDate ge ")
                .and_then(|d| d.parse::<NaiveDate>().ok())
                .ok_or_else(|| {
                    BillingError::InvalidResponse(format!("Unexpected filter: {filter}"))
                })?;
            Ok(self
                .0
                .iter()
                .filter(|p| p.end_date >= date)
                .cloned()
                .collect())
        }

        async fn usage_page(
            &self,
            _period_name: &str,
            _filter: Option<&str>,
            _continuation: Option<&str>,
        ) -> Result<UsagePage, BillingError> {
            unimplemented!("not used by resolver tests")
        }
    }

    fn period(name: &str, start: (i32, u32, u32), end: (i32, u32, u32)) -> BillingPeriod {
        BillingPeriod {
            name: name.to_string(),
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Reverse-chronological listing, as the real API returns it.
    fn summer_2018() -> FixedPeriods {
        FixedPeriods(vec![
            period("Aug2018", (2018, 8, 1), (2018, 8, 31)),
            period("Jul2018", (2018, 7, 1), (2018, 7, 31)),
            period("Jun2018", (2018, 6, 1), (2018, 6, 30)),
        ])
    }

    #[tokio::test]
    async fn test_resolves_containing_period() {
        let resolved = resolve_period(&summer_2018(), date(2018, 7, 3)).await.unwrap();
        assert_eq!(resolved.name, "Jul2018");
    }

    #[tokio::test]
    async fn test_resolution_constant_within_period() {
        let api = summer_2018();
        let first = resolve_period(&api, date(2018, 7, 1)).await.unwrap();
        let mid = resolve_period(&api, date(2018, 7, 15)).await.unwrap();
        let last = resolve_period(&api, date(2018, 7, 31)).await.unwrap();
        assert_eq!(first, mid);
        assert_eq!(mid, last);
    }

    #[tokio::test]
    async fn test_last_day_of_period_resolves() {
        // End dates are inclusive; the filter must not drop the period
        // ending exactly on the requested date.
        let resolved = resolve_period(&summer_2018(), date(2018, 7, 31))
            .await
            .unwrap();
        assert_eq!(resolved.name, "Jul2018");

        let resolved = resolve_period(&summer_2018(), date(2018, 6, 30))
            .await
            .unwrap();
        assert_eq!(resolved.name, "Jun2018");
    }

    #[tokio::test]
    async fn test_ordering_of_listing_is_irrelevant() {
        let mut shuffled = summer_2018().0;
        shuffled.reverse();
        let resolved = resolve_period(&FixedPeriods(shuffled), date(2018, 7, 3))
            .await
            .unwrap();
        assert_eq!(resolved.name, "Jul2018");
    }

    #[tokio::test]
    async fn test_uncovered_date_is_period_not_found() {
        let err = resolve_period(&summer_2018(), date(2019, 1, 1))
            .await
            .unwrap_err();
        match err {
            BillingError::PeriodNotFound { date: d } => assert_eq!(d, date(2019, 1, 1)),
            other => panic!("expected PeriodNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_end_date_filter_format() {
        assert_eq!(
            end_date_filter(date(2018, 7, 3)),
            "billingPeriodEndDate ge 2018-07-03"
        );
    }
}
