// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `Cloudspend` Billing
//!
//! Billing API collaborator for the `Cloudspend` pipeline: the bearer-token
//! capability, the retrying HTTP client, the [`BillingApi`] trait seam, the
//! billing-period resolver, and the paginated usage pager.
//!
//! The remote surface is the Azure-shaped consumption REST API: billing
//! periods are listed with an OData filter, usage details are listed per
//! period in pages of up to 100 rows with an opaque `nextLink`
//! continuation token.

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod pager;
pub mod periods;
pub mod retry;

pub use api::{BillingApi, RestClient, UsagePage};
pub use auth::BearerToken;
pub use error::BillingError;
pub use pager::{UsageFilter, UsagePager};
pub use periods::resolve_period;
pub use retry::RetryStrategy;
