//! Provider classification from hierarchical resource identifiers.
//!
//! An instance identifier is a path of the form
//! `/subscriptions/{guid}/resourceGroups/{group}/providers/{provider-namespace}/{type}/{name}`
//! (see the Azure resource-by-id docs). The provider label is the
//! namespace and resource-type pair, i.e. segments 6 and 7 after splitting
//! on `/` (segment 0 is the empty string before the leading slash).

use crate::error::ClassifyError;
use crate::models::ProviderLabel;

/// Minimum number of segments an identifier must split into for the
/// provider namespace and resource type to both be present.
const MIN_SEGMENTS: usize = 8;

/// Index of the provider-namespace segment.
const NAMESPACE_INDEX: usize = 6;

/// Derives the provider label from a usage record's instance identifier.
///
/// Deterministic: the same identifier always yields the same label.
/// Identifiers with fewer than 8 segments (subscription-level or
/// resource-group-level resources with no nested provider) are rejected
/// with [`ClassifyError::MalformedInstanceId`] rather than producing a
/// truncated label.
///
/// # Errors
///
/// Returns [`ClassifyError::MalformedInstanceId`] when the identifier has
/// fewer than 8 `/`-separated segments.
pub fn classify(instance_id: &str) -> Result<ProviderLabel, ClassifyError> {
    let parts: Vec<&str> = instance_id.split('/').collect();
    if parts.len() < MIN_SEGMENTS {
        return Err(ClassifyError::MalformedInstanceId {
            segments: parts.len(),
            instance_id: instance_id.to_string(),
        });
    }

    Ok(ProviderLabel::new(
        parts[NAMESPACE_INDEX..NAMESPACE_INDEX + 2].join("/"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VM_ID: &str = "/subscriptions/5db4a73e/resourceGroups/my-group/providers/Microsoft.Compute/virtualMachines/my-vm";

    #[test]
    fn test_classify_extracts_namespace_and_type() {
        let label = classify(VM_ID).unwrap();
        assert_eq!(label.as_str(), "Microsoft.Compute/virtualMachines");
    }

    #[test]
    fn test_classify_is_deterministic() {
        assert_eq!(classify(VM_ID).unwrap(), classify(VM_ID).unwrap());
    }

    #[test]
    fn test_classify_accepts_exactly_eight_segments() {
        let label = classify("/subscriptions/x/resourceGroups/g/providers/Microsoft.Storage/disks").unwrap();
        assert_eq!(label.as_str(), "Microsoft.Storage/disks");
    }

    #[test]
    fn test_classify_rejects_short_identifier() {
        // Five segments: a resource-group-level resource with no provider.
        let err = classify("/subscriptions/x/resourceGroups/g").unwrap_err();
        match err {
            ClassifyError::MalformedInstanceId { segments, .. } => assert_eq!(segments, 5),
        }
    }

    #[test]
    fn test_classify_rejects_empty_identifier() {
        let err = classify("").unwrap_err();
        match err {
            ClassifyError::MalformedInstanceId { segments, .. } => assert_eq!(segments, 1),
        }
    }
}
