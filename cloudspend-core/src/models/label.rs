//! Provider label type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A derived classification string identifying which cloud resource
/// namespace and type a usage record belongs to, e.g.
/// `Microsoft.Compute/virtualMachines`.
///
/// Labels are produced by [`crate::classify::classify`]; any string content
/// is accepted, the two-segment shape is enforced at construction time by
/// the classifier rather than validated here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderLabel(String);

impl ProviderLabel {
    /// Wraps an already-derived label string.
    pub(crate) fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Returns the label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ProviderLabel> for String {
    fn from(label: ProviderLabel) -> Self {
        label.0
    }
}
