//! CLI command implementations.

pub mod ingest;
pub mod period;
pub mod usage;
