//! InfluxDB HTTP write client.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

use cloudspend_core::{CostAggregate, ProviderLabel, UsageRecord};

use crate::config::SinkConfig;
use crate::error::SinkError;
use crate::line::{encode_aggregate, encode_record};
use crate::CostSink;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Production [`CostSink`] writing line protocol to an InfluxDB-compatible
/// `/write` endpoint with basic auth.
#[derive(Debug, Clone)]
pub struct InfluxSink {
    client: Client,
    config: SinkConfig,
}

impl InfluxSink {
    /// Creates a sink for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::InvalidConfig`] for an unusable configuration
    /// or [`SinkError::Http`] when the HTTP client cannot be built.
    pub fn new(config: SinkConfig) -> Result<Self, SinkError> {
        config.validate()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(concat!("cloudspend/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, config })
    }

    async fn write_lines(&self, body: String) -> Result<(), SinkError> {
        if body.is_empty() {
            debug!("Nothing to write, skipping sink call");
            return Ok(());
        }

        let response = self
            .client
            .post(self.config.write_url())
            .basic_auth(&self.config.username, Some(&self.config.password))
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SinkError::WriteRejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl CostSink for InfluxSink {
    #[instrument(skip(self, aggregate), fields(buckets = aggregate.len()))]
    async fn write_aggregate(
        &self,
        date: NaiveDate,
        aggregate: &CostAggregate,
    ) -> Result<(), SinkError> {
        debug!(database = %self.config.database, "Writing aggregate");
        self.write_lines(encode_aggregate(date, aggregate)).await
    }

    #[instrument(skip(self, record, provider))]
    async fn write_record(
        &self,
        record: &UsageRecord,
        provider: &ProviderLabel,
    ) -> Result<(), SinkError> {
        self.write_lines(encode_record(record, provider)).await
    }
}
