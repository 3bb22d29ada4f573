//! Billing API trait seam and REST implementation.
//!
//! [`BillingApi`] is the boundary the resolver, pager, and ingestion
//! pipeline are written against; [`RestClient`] is the production
//! implementation over the Azure-shaped consumption REST surface. Tests
//! substitute in-memory fakes at this seam.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use cloudspend_core::{BillingPeriod, UsageRecord};

use crate::auth::BearerToken;
use crate::client::HttpClient;
use crate::error::BillingError;

// ============================================================================
// Constants
// ============================================================================

/// Management API base URL.
const MANAGEMENT_BASE: &str = "https://management.azure.com";

/// API version for billing period listings.
const PERIODS_API_VERSION: &str = "2018-03-01-preview";

/// API version for usage detail listings.
const USAGE_API_VERSION: &str = "2018-05-31";

/// Maximum number of usage rows requested per page.
pub const PAGE_SIZE: u32 = 100;

// ============================================================================
// Trait Seam
// ============================================================================

/// One transport page of usage records.
#[derive(Debug, Clone)]
pub struct UsagePage {
    /// Records carried by this page.
    pub records: Vec<UsageRecord>,
    /// Opaque continuation token for the next page, `None` on the last.
    pub continuation: Option<String>,
}

/// The billing API surface the pipeline consumes.
///
/// Both operations require the implementation to hold a valid
/// authorization capability; the trait itself never exposes it.
#[async_trait]
pub trait BillingApi: Send + Sync {
    /// Lists billing periods matching an OData filter, in whatever order
    /// the remote chooses. Callers must not rely on the ordering.
    async fn list_periods(&self, filter: &str) -> Result<Vec<BillingPeriod>, BillingError>;

    /// Fetches one page of usage records for a billing period.
    ///
    /// `filter` optionally restricts rows server-side; `continuation` is
    /// the token returned by the previous page, `None` for the first.
    async fn usage_page(
        &self,
        period_name: &str,
        filter: Option<&str>,
        continuation: Option<&str>,
    ) -> Result<UsagePage, BillingError>;
}

// ============================================================================
// Transport DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
struct PeriodsListResponse {
    #[serde(default)]
    value: Vec<PeriodRow>,
    #[serde(rename = "nextLink")]
    next_link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PeriodRow {
    name: String,
    properties: PeriodProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PeriodProperties {
    billing_period_start_date: NaiveDate,
    billing_period_end_date: NaiveDate,
}

impl From<PeriodRow> for BillingPeriod {
    fn from(row: PeriodRow) -> Self {
        BillingPeriod {
            name: row.name,
            start_date: row.properties.billing_period_start_date,
            end_date: row.properties.billing_period_end_date,
        }
    }
}

#[derive(Debug, Deserialize)]
struct UsageListResponse {
    #[serde(default)]
    value: Vec<UsageRow>,
    #[serde(rename = "nextLink")]
    next_link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageRow {
    properties: UsageRowProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageRowProperties {
    instance_id: String,
    pretax_cost: Decimal,
    currency: String,
    usage_start: DateTime<Utc>,
    usage_end: DateTime<Utc>,
    #[serde(default)]
    is_estimated: Option<bool>,
}

impl From<UsageRow> for UsageRecord {
    fn from(row: UsageRow) -> Self {
        let p = row.properties;
        UsageRecord {
            instance_id: p.instance_id,
            pretax_cost: p.pretax_cost,
            currency: p.currency,
            usage_start: p.usage_start,
            usage_end: p.usage_end,
            is_estimated: p.is_estimated,
        }
    }
}

/// Decodes a response body, mapping decode failures to
/// [`BillingError::Json`] so a malformed payload is distinguishable from
/// a transport failure.
fn parse_body<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, BillingError> {
    Ok(serde_json::from_str(body)?)
}

// ============================================================================
// REST Client
// ============================================================================

/// Production [`BillingApi`] implementation over HTTPS.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: HttpClient,
    token: BearerToken,
    subscription_id: String,
    base_url: String,
}

impl RestClient {
    /// Creates a client for one subscription, holding the token capability
    /// for the lifetime of the run.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::Http`] when the HTTP client cannot be built.
    pub fn new(subscription_id: impl Into<String>, token: BearerToken) -> Result<Self, BillingError> {
        Ok(Self {
            http: HttpClient::new()?,
            token,
            subscription_id: subscription_id.into(),
            base_url: MANAGEMENT_BASE.to_string(),
        })
    }

    /// Overrides the API base URL (test and sovereign-cloud endpoints).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn periods_url(&self, filter: &str) -> Result<Url, BillingError> {
        let mut url = Url::parse(&format!(
            "{}/subscriptions/{}/providers/Microsoft.Billing/billingPeriods",
            self.base_url, self.subscription_id
        ))
        .map_err(|e| BillingError::InvalidResponse(format!("Invalid periods URL: {e}")))?;
        url.query_pairs_mut()
            .append_pair("api-version", PERIODS_API_VERSION)
            .append_pair("$filter", filter);
        Ok(url)
    }

    fn usage_url(&self, period_name: &str, filter: Option<&str>) -> Result<Url, BillingError> {
        let mut url = Url::parse(&format!(
            "{}/subscriptions/{}/providers/Microsoft.Billing/billingPeriods/{}/providers/Microsoft.Consumption/usageDetails",
            self.base_url, self.subscription_id, period_name
        ))
        .map_err(|e| BillingError::InvalidResponse(format!("Invalid usage URL: {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("api-version", USAGE_API_VERSION)
                .append_pair("$top", &PAGE_SIZE.to_string());
            if let Some(filter) = filter {
                pairs.append_pair("$filter", filter);
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl BillingApi for RestClient {
    #[instrument(skip(self))]
    async fn list_periods(&self, filter: &str) -> Result<Vec<BillingPeriod>, BillingError> {
        let mut periods = Vec::new();
        let mut next: Option<String> = Some(self.periods_url(filter)?.into());

        // The periods listing itself paginates; drain it completely.
        while let Some(url) = next {
            let response = self.http.get_with_auth(&url, &self.token).await?;
            let body = response.text().await?;
            let page: PeriodsListResponse = parse_body(&body)?;
            debug!(count = page.value.len(), "Received billing periods page");
            periods.extend(page.value.into_iter().map(BillingPeriod::from));
            next = page.next_link;
        }

        Ok(periods)
    }

    #[instrument(skip(self))]
    async fn usage_page(
        &self,
        period_name: &str,
        filter: Option<&str>,
        continuation: Option<&str>,
    ) -> Result<UsagePage, BillingError> {
        let url = match continuation {
            // nextLink is an absolute URL carrying its own query string.
            Some(link) => link.to_string(),
            None => self.usage_url(period_name, filter)?.into(),
        };

        let response = self.http.get_with_auth(&url, &self.token).await?;
        let body = response.text().await?;
        let page: UsageListResponse = parse_body(&body)?;
        debug!(
            count = page.value.len(),
            has_more = page.next_link.is_some(),
            "Received usage details page"
        );

        Ok(UsagePage {
            records: page.value.into_iter().map(UsageRecord::from).collect(),
            continuation: page.next_link,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_row_deserializes_from_api_shape() {
        let json = r#"{
            "id": "/subscriptions/x/providers/Microsoft.Billing/billingPeriods/201809-1/providers/Microsoft.Consumption/usageDetails/abc",
            "name": "abc",
            "properties": {
                "instanceId": "/subscriptions/x/resourceGroups/g/providers/Microsoft.Compute/vm/a",
                "pretaxCost": 1.5,
                "currency": "EUR",
                "usageStart": "2018-09-03T00:00:00Z",
                "usageEnd": "2018-09-04T00:00:00Z",
                "isEstimated": false
            }
        }"#;
        let row: UsageRow = serde_json::from_str(json).unwrap();
        let record = UsageRecord::from(row);
        assert_eq!(record.pretax_cost, "1.5".parse().unwrap());
        assert_eq!(record.currency, "EUR");
        assert_eq!(record.is_estimated, Some(false));
    }

    #[test]
    fn test_period_row_deserializes_from_api_shape() {
        let json = r#"{
            "id": "/subscriptions/x/providers/Microsoft.Billing/billingPeriods/201809-1",
            "name": "201809-1",
            "properties": {
                "billingPeriodStartDate": "2018-09-01",
                "billingPeriodEndDate": "2018-09-30"
            }
        }"#;
        let row: PeriodRow = serde_json::from_str(json).unwrap();
        let period = BillingPeriod::from(row);
        assert_eq!(period.name, "201809-1");
        assert_eq!(
            period.start_date,
            NaiveDate::from_ymd_opt(2018, 9, 1).unwrap()
        );
    }

    #[test]
    fn test_malformed_body_is_json_error() {
        let err = parse_body::<UsageListResponse>("<html>gateway timeout</html>").unwrap_err();
        assert!(matches!(err, BillingError::Json(_)));
    }

    #[test]
    fn test_usage_list_response_without_next_link() {
        let json = r#"{"value": []}"#;
        let page: UsageListResponse = serde_json::from_str(json).unwrap();
        assert!(page.value.is_empty());
        assert!(page.next_link.is_none());
    }
}
