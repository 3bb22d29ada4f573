//! Domain models for Cloudspend.
//!
//! This module contains the core data structures flowing through the
//! ingestion pipeline: billed usage line items, the billing periods they
//! belong to, and the provider labels derived from them.
//!
//! ## Submodules
//!
//! - [`usage`] - Usage line items ([`UsageRecord`])
//! - [`period`] - Billing periods ([`BillingPeriod`])
//! - [`label`] - Provider labels ([`ProviderLabel`])

mod label;
mod period;
mod usage;

// Re-export everything at the models level
pub use label::ProviderLabel;
pub use period::BillingPeriod;
pub use usage::UsageRecord;

#[cfg(test)]
mod serde_tests;
