//! Tag namespace normalization.
//!
//! The search index cannot store a null namespace, so the producer writes
//! [`NAMESPACE_NULL_VALUE`] instead. Formatting turns the sentinel back
//! into an explicit null before tags reach callers.

use crate::domain::models::{Namespace, NormalizedTag, Tag, NAMESPACE_NULL_VALUE};

/// Replace `reserved_marker` namespaces with [`Namespace::Null`].
///
/// Element-wise: same length, same order, every other field untouched.
/// Tags without a namespace key pass through as they are.
pub fn normalize(tags: &[Tag], reserved_marker: &str) -> Vec<NormalizedTag> {
    tags.iter()
        .map(|tag| match &tag.namespace {
            Namespace::Named(namespace) if namespace == reserved_marker => Tag {
                namespace: Namespace::Null,
                fields: tag.fields.clone(),
            },
            _ => tag.clone(),
        })
        .collect()
}

/// Format tags returned by the index. `None` is treated as no tags.
pub fn format_tags(tags: Option<&[Tag]>) -> Vec<NormalizedTag> {
    normalize(tags.unwrap_or_default(), NAMESPACE_NULL_VALUE)
}

/// Namespace value to query the index with; the inverse of [`format_tags`].
pub fn namespace_for_query(namespace: Option<&str>) -> &str {
    namespace.unwrap_or(NAMESPACE_NULL_VALUE)
}
