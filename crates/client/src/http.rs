//! reqwest-backed [`Transport`].

use std::time::Duration;

use async_trait::async_trait;
use specimark_core::query::QueryPair;

use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::transport::{Transport, TransportResponse};

/// HTTP transport for a single labels server.
pub struct HttpTransport {
    client: reqwest::Client,
    api_url: String,
}

impl HttpTransport {
    /// Build a transport with its own connection pool from `config`.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self::with_client(client, config.api_url.clone()))
    }

    /// Create a transport reusing an existing [`reqwest::Client`]
    /// (useful for sharing a connection pool).
    pub fn with_client(client: reqwest::Client, api_url: String) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.api_url, path)
        } else {
            format!("{}/{}", self.api_url, path)
        }
    }

    /// Read status and body, leaving status interpretation to the caller.
    async fn read(response: reqwest::Response) -> Result<TransportResponse, TransportError> {
        let status = response.status();
        let body = response.text().await.map_err(classify)?;
        Ok(TransportResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

/// Separate "could not reach the server" from other request failures.
fn classify(e: reqwest::Error) -> TransportError {
    if e.is_connect() || e.is_timeout() {
        TransportError::Unreachable(e.to_string())
    } else {
        TransportError::Request(e)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, query: &[QueryPair]) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(classify)?;

        Self::read(response).await
    }

    async fn post_json(
        &self,
        path: &str,
        query: &[QueryPair],
        body: &serde_json::Value,
    ) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .post(self.url(path))
            .query(query)
            .json(body)
            .send()
            .await
            .map_err(classify)?;

        Self::read(response).await
    }
}
