//! Annotation CRUD, export and statistics over the labels endpoints.
//!
//! Every operation issues at most one request. Scope is an explicit
//! argument: one [`AnnotationClient`] can serve public and private
//! projects concurrently. There is no ordering between independent
//! calls and no concurrency token, so saves are last-write-wins.

use std::sync::Arc;

use serde_json::Value;
use specimark_core::model::Annotation;
use specimark_core::query::{self, ContextFilter, ExportFormat, QueryPair};
use specimark_core::scope::{LabelScope, MediaScope};
use specimark_core::stats::AnnotationStats;
use specimark_core::transform::{domain_to_wire, wire_to_domain};
use specimark_core::types::DbId;
use specimark_core::wire::{AnnotationIds, DeleteRequest, SaveRequest};

use crate::config::ClientConfig;
use crate::error::{AnnotationError, ResponseError, TransportError};
use crate::http::HttpTransport;
use crate::transport::{Transport, TransportResponse};

/// Entry point for annotation operations against one backend.
#[derive(Clone)]
pub struct AnnotationClient {
    transport: Arc<dyn Transport>,
}

impl AnnotationClient {
    /// Create a client over an injected transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Create a client backed by [`HttpTransport`].
    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        Ok(Self::new(Arc::new(HttpTransport::new(config)?)))
    }

    /// Fetch the annotations stored under `scope`, optionally narrowed by
    /// a context filter. An empty list is a valid result.
    pub async fn fetch(
        &self,
        scope: &LabelScope,
        filter: &ContextFilter,
    ) -> Result<Vec<Annotation>, AnnotationError> {
        let path = scope.media.labels_path();
        let body = self
            .get_json(&path, &query::fetch_query(scope, filter))
            .await
            .map_err(AnnotationError::Fetch)?;

        let annotations = wire_to_domain(&body);
        tracing::debug!(
            project_id = scope.media.project_id,
            media_id = scope.media.media_id,
            count = annotations.len(),
            "Fetched annotations"
        );
        Ok(annotations)
    }

    /// Create or update a batch of annotations.
    ///
    /// Records without an `annotation_id` are created; records with one
    /// are updated. Returns the server's result object verbatim.
    pub async fn save(
        &self,
        media: &MediaScope,
        annotation_type: &str,
        link_id: DbId,
        annotations: &[Annotation],
    ) -> Result<Value, AnnotationError> {
        let request = SaveRequest {
            link_id,
            save: domain_to_wire(annotations),
        };
        let body = serde_json::to_value(&request)
            .map_err(|e| AnnotationError::Save(ResponseError::Encode(e)))?;

        let result = self
            .post_json(&media.edit_path(), &query::edit_query(annotation_type), &body)
            .await
            .map_err(AnnotationError::Save)?;

        let created = annotations.iter().filter(|a| !a.is_saved()).count();
        tracing::info!(
            project_id = media.project_id,
            media_id = media.media_id,
            link_id,
            created,
            updated = annotations.len() - created,
            "Saved annotations"
        );
        Ok(result)
    }

    /// Save a single annotation. Same request as a one-element [`save`](Self::save).
    pub async fn update(
        &self,
        media: &MediaScope,
        annotation_type: &str,
        link_id: DbId,
        annotation: &Annotation,
    ) -> Result<Value, AnnotationError> {
        self.save(media, annotation_type, link_id, std::slice::from_ref(annotation))
            .await
    }

    /// Delete annotations by id. Accepts a single id or a list.
    pub async fn delete(
        &self,
        media: &MediaScope,
        ids: impl Into<AnnotationIds>,
    ) -> Result<Value, AnnotationError> {
        let request = DeleteRequest {
            annotation_ids: ids.into().into_vec(),
        };
        let count = request.annotation_ids.len();
        let body = serde_json::to_value(&request)
            .map_err(|e| AnnotationError::Delete(ResponseError::Encode(e)))?;

        let result = self
            .post_json(&media.delete_path(), &[], &body)
            .await
            .map_err(AnnotationError::Delete)?;

        tracing::info!(
            project_id = media.project_id,
            media_id = media.media_id,
            count,
            "Deleted annotations"
        );
        Ok(result)
    }

    /// Export annotations in the requested format.
    ///
    /// JSON exports are re-serialized with stable two-space indentation;
    /// every other format is returned exactly as the server sent it.
    pub async fn export(
        &self,
        media: &MediaScope,
        format: &ExportFormat,
        annotation_type: &str,
        filter: &ContextFilter,
    ) -> Result<String, AnnotationError> {
        let query = query::export_query(format, annotation_type, filter);
        let response = self
            .send_get(&media.export_path(), &query)
            .await
            .map_err(AnnotationError::Export)?;

        match format {
            ExportFormat::Json => {
                let value = response
                    .json()
                    .map_err(|e| AnnotationError::Export(ResponseError::Malformed(e)))?;
                serde_json::to_string_pretty(&value)
                    .map_err(|e| AnnotationError::Export(ResponseError::Malformed(e)))
            }
            ExportFormat::Csv | ExportFormat::Other(_) => Ok(response.body),
        }
    }

    /// Counts by shape type and author for one media item.
    ///
    /// Propagates fetch failures. See [`stats`](Self::stats) for the
    /// best-effort variant.
    pub async fn try_stats(
        &self,
        media: &MediaScope,
        annotation_type: &str,
    ) -> Result<AnnotationStats, AnnotationError> {
        let scope = LabelScope::new(*media, annotation_type);
        let annotations = self.fetch(&scope, &ContextFilter::default()).await?;
        Ok(AnnotationStats::from_annotations(&annotations))
    }

    /// Best-effort counts. Any failure yields the all-zero aggregate.
    pub async fn stats(&self, media: &MediaScope, annotation_type: &str) -> AnnotationStats {
        match self.try_stats(media, annotation_type).await {
            Ok(stats) => stats,
            Err(e) => {
                tracing::warn!(
                    project_id = media.project_id,
                    media_id = media.media_id,
                    error = %e,
                    "Annotation stats unavailable, reporting zeros"
                );
                AnnotationStats::default()
            }
        }
    }

    // ---- private helpers ----

    /// GET and require a success status.
    async fn send_get(&self, path: &str, query: &[QueryPair]) -> Result<TransportResponse, ResponseError> {
        tracing::debug!(path, "GET");
        let response = self.transport.get(path, query).await?;
        ensure_success(response)
    }

    async fn get_json(&self, path: &str, query: &[QueryPair]) -> Result<Value, ResponseError> {
        let response = self.send_get(path, query).await?;
        response.json().map_err(ResponseError::Malformed)
    }

    /// POST JSON and parse the JSON result. An empty success body is `null`.
    async fn post_json(
        &self,
        path: &str,
        query: &[QueryPair],
        body: &Value,
    ) -> Result<Value, ResponseError> {
        tracing::debug!(path, "POST");
        let response = ensure_success(self.transport.post_json(path, query, body).await?)?;
        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        response.json().map_err(ResponseError::Malformed)
    }
}

fn ensure_success(response: TransportResponse) -> Result<TransportResponse, ResponseError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ResponseError::from_status(&response))
    }
}
