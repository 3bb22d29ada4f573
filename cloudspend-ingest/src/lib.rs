// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `Cloudspend` Ingest
//!
//! The ingestion orchestrator: drives a date range one day at a time,
//! resolves each day's billing period, pulls the day's usage records
//! through the pager, aggregates cost per provider, and forwards the
//! result to the time-series sink.
//!
//! Days are processed strictly sequentially with one outstanding remote
//! call at a time; a day's failure is isolated into the run report rather
//! than aborting the whole run (unless fail-fast is requested).

pub mod error;
pub mod pipeline;
pub mod report;

pub use error::IngestError;
pub use pipeline::{DateRange, Direction, IngestOptions, IngestPipeline};
pub use report::{DayFailure, DaySummary, IngestReport};
