// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `Cloudspend` Sink
//!
//! Time-series sink collaborator: encodes per-provider cost data as
//! InfluxDB line protocol and writes it over HTTP. The pipeline talks to
//! the [`CostSink`] trait; [`InfluxSink`] is the production
//! implementation, and tests substitute in-memory recorders.

pub mod config;
pub mod error;
pub mod influx;
pub mod line;

pub use config::SinkConfig;
pub use error::SinkError;
pub use influx::InfluxSink;

use async_trait::async_trait;
use chrono::NaiveDate;
use cloudspend_core::{CostAggregate, ProviderLabel, UsageRecord};

/// The write surface the ingestion pipeline uses.
///
/// Writes are idempotent per point: rewriting the same timestamp and tag
/// set overwrites rather than duplicates, so a re-run of a day is safe.
#[async_trait]
pub trait CostSink: Send + Sync {
    /// Writes one aggregate (one point per bucket), timestamped at `date`.
    async fn write_aggregate(
        &self,
        date: NaiveDate,
        aggregate: &CostAggregate,
    ) -> Result<(), SinkError>;

    /// Writes one raw usage record with its derived provider label.
    async fn write_record(
        &self,
        record: &UsageRecord,
        provider: &ProviderLabel,
    ) -> Result<(), SinkError>;
}
