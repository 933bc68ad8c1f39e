//! Aggregate counts over a set of annotations.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::Annotation;

/// Key used in `by_user` for annotations without an author.
pub const UNKNOWN_USER: &str = "unknown";

/// Key used in `by_type` for annotations without a shape tag.
pub const UNTYPED: &str = "none";

/// Counts derived from a fetched annotation set.
///
/// The all-zero value doubles as the "unavailable" answer when the
/// annotations could not be fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationStats {
    pub total: usize,
    pub by_type: BTreeMap<String, usize>,
    pub by_user: BTreeMap<String, usize>,
    /// Number of annotations without a server-assigned id.
    pub has_unsaved: usize,
}

impl AnnotationStats {
    pub fn from_annotations(annotations: &[Annotation]) -> Self {
        let mut stats = Self {
            total: annotations.len(),
            ..Self::default()
        };

        for annotation in annotations {
            let tag = annotation.shape.tag().unwrap_or(UNTYPED);
            *stats.by_type.entry(tag.to_string()).or_default() += 1;

            let user = annotation
                .provenance
                .user_name
                .as_deref()
                .filter(|u| !u.is_empty())
                .unwrap_or(UNKNOWN_USER);
            *stats.by_user.entry(user.to_string()).or_default() += 1;

            if !annotation.is_saved() {
                stats.has_unsaved += 1;
            }
        }

        stats
    }
}
