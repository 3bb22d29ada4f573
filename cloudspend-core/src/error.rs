//! Core error types for `Cloudspend`.

use thiserror::Error;

/// Error type for provider classification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// The instance identifier does not have enough path segments to carry
    /// a provider namespace and resource type.
    #[error(
        "Malformed instance identifier (expected at least 8 '/'-separated segments, got {segments}): {instance_id}"
    )]
    MalformedInstanceId {
        /// Number of segments the identifier split into.
        segments: usize,
        /// The offending identifier, for diagnostics.
        instance_id: String,
    },
}
