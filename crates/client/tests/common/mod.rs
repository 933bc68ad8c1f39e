#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use specimark_client::{AnnotationClient, Transport, TransportError, TransportResponse};
use specimark_core::query::QueryPair;
use specimark_core::scope::{LabelScope, MediaScope, Visibility};

/// A request as seen by the fake transport.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

/// In-memory transport that records requests and replays queued
/// responses in order. Unqueued requests get `200 []`.
#[derive(Default)]
pub struct FakeTransport {
    requests: Mutex<Vec<RecordedRequest>>,
    responses: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: &str) {
        let status_text = match status {
            200 => "OK",
            400 => "Bad Request",
            404 => "Not Found",
            500 => "Internal Server Error",
            _ => "",
        };
        self.responses.lock().unwrap().push_back(Ok(TransportResponse {
            status,
            status_text: status_text.to_string(),
            body: body.to_string(),
        }));
    }

    pub fn respond_json(&self, status: u16, body: serde_json::Value) {
        self.respond(status, &body.to_string());
    }

    pub fn fail(&self, error: TransportError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> RecordedRequest {
        self.requests().last().cloned().expect("no request recorded")
    }

    fn record(
        &self,
        method: &'static str,
        path: &str,
        query: &[QueryPair],
        body: Option<&serde_json::Value>,
    ) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            path: path.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            body: body.cloned(),
        });
        self.responses.lock().unwrap().pop_front().unwrap_or_else(|| {
            Ok(TransportResponse {
                status: 200,
                status_text: "OK".to_string(),
                body: "[]".to_string(),
            })
        })
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, path: &str, query: &[QueryPair]) -> Result<TransportResponse, TransportError> {
        self.record("GET", path, query, None)
    }

    async fn post_json(
        &self,
        path: &str,
        query: &[QueryPair],
        body: &serde_json::Value,
    ) -> Result<TransportResponse, TransportError> {
        self.record("POST", path, query, Some(body))
    }
}

pub fn client(transport: &Arc<FakeTransport>) -> AnnotationClient {
    AnnotationClient::new(transport.clone())
}

pub fn private_media() -> MediaScope {
    MediaScope::new(12, 34, Visibility::Private).unwrap()
}

pub fn public_media() -> MediaScope {
    MediaScope::new(56, 78, Visibility::Public).unwrap()
}

pub fn media_labels() -> LabelScope {
    LabelScope::new(private_media(), "M")
}

pub fn query(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
