//! Transport port.
//!
//! The labels client only needs GET and JSON POST with a query string.
//! Anything that can do that (reqwest, a test double, a proxy) can back
//! an [`AnnotationClient`](crate::AnnotationClient).

use async_trait::async_trait;
use specimark_core::query::QueryPair;

use crate::error::TransportError;

/// A fully received HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    /// Canonical reason phrase, e.g. `Not Found`. May be empty.
    pub status_text: String,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Issues requests against resource paths such as
/// `/services/projects/1/media/2/labels`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str, query: &[QueryPair]) -> Result<TransportResponse, TransportError>;

    async fn post_json(
        &self,
        path: &str,
        query: &[QueryPair],
        body: &serde_json::Value,
    ) -> Result<TransportResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range() {
        let mut r = TransportResponse {
            status: 204,
            status_text: String::new(),
            body: String::new(),
        };
        assert!(r.is_success());
        r.status = 304;
        assert!(!r.is_success());
        r.status = 199;
        assert!(!r.is_success());
    }

    #[test]
    fn json_parse_error_surfaces() {
        let r = TransportResponse {
            status: 200,
            status_text: "OK".into(),
            body: "<html>".into(),
        };
        assert!(r.json().is_err());
    }
}
