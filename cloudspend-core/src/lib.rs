// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `Cloudspend` Core
//!
//! Core types and logic for the `Cloudspend` ingestion pipeline.
//!
//! This crate provides the foundational abstractions used across all other
//! `Cloudspend` crates, including:
//!
//! - Domain models (usage records, billing periods, provider labels)
//! - Provider classification from hierarchical resource identifiers
//! - Per-provider cost aggregation with exact decimal arithmetic
//! - Core error types
//!
//! ## Key Types
//!
//! ### Domain Models
//! - [`UsageRecord`] - One billed line item of consumption
//! - [`BillingPeriod`] - A named, inclusive date range usage is billed over
//! - [`ProviderLabel`] - Derived resource-provider classification
//!
//! ### Aggregation
//! - [`CostAggregate`] - Per-provider accumulated cost totals
//! - [`AggregateKey`] - Grouping key, shaped by [`GroupingPolicy`]
//! - [`GroupingPolicy`] - Whether sums are partitioned by currency

pub mod aggregate;
pub mod classify;
pub mod error;
pub mod models;

// Re-export error types
pub use error::ClassifyError;

// Re-export all model types
pub use models::{BillingPeriod, ProviderLabel, UsageRecord};

// Re-export classification and aggregation
pub use aggregate::{AggregateKey, CostAggregate, GroupingPolicy};
pub use classify::classify;
