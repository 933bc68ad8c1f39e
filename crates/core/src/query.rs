//! Query-string construction for the labels endpoints.

use crate::error::CoreError;
use crate::scope::LabelScope;
use crate::types::DbId;

/// A single `key=value` query pair.
pub type QueryPair = (&'static str, String);

/// Optional secondary filter narrowing which annotations are returned,
/// e.g. the ones belonging to one matrix cell rather than the general
/// media view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextFilter {
    pub context_type: Option<String>,
    pub context_id: Option<DbId>,
}

impl ContextFilter {
    pub fn new(context_type: impl Into<String>, context_id: DbId) -> Self {
        Self {
            context_type: Some(context_type.into()),
            context_id: Some(context_id),
        }
    }

    fn append_to(&self, pairs: &mut Vec<QueryPair>) {
        if let Some(context_type) = &self.context_type {
            pairs.push(("context_type", context_type.clone()));
        }
        if let Some(context_id) = self.context_id {
            pairs.push(("context_id", context_id.to_string()));
        }
    }
}

/// Output format requested from the export endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    /// Any other format the server understands. Returned as raw text.
    Other(String),
}

impl ExportFormat {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Other(s) => s.as_str(),
        }
    }

    /// Parse a format name. Unknown non-empty names are passed through.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" => Err(CoreError::Validation(
                "export format must not be empty".to_string(),
            )),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Ok(Self::Other(other.to_string())),
        }
    }
}

/// `type`, optional `link_id`, then the context filter.
pub fn fetch_query(scope: &LabelScope, filter: &ContextFilter) -> Vec<QueryPair> {
    let mut pairs = vec![("type", scope.annotation_type.clone())];
    if let Some(link_id) = scope.link_id {
        pairs.push(("link_id", link_id.to_string()));
    }
    filter.append_to(&mut pairs);
    pairs
}

pub fn edit_query(annotation_type: &str) -> Vec<QueryPair> {
    vec![("type", annotation_type.to_string())]
}

/// `format`, `type`, then the context filter.
pub fn export_query(
    format: &ExportFormat,
    annotation_type: &str,
    filter: &ContextFilter,
) -> Vec<QueryPair> {
    let mut pairs = vec![
        ("format", format.as_str().to_string()),
        ("type", annotation_type.to_string()),
    ];
    filter.append_to(&mut pairs);
    pairs
}
