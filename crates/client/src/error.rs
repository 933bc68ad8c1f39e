//! Error taxonomy for the labels client.
//!
//! Three layers, from the wire up:
//!
//! * [`TransportError`] -- the request never produced a response.
//! * [`ResponseError`] -- one round trip failed (network, status, body).
//! * [`AnnotationError`] -- which operation failed, wrapping the cause.

use crate::transport::TransportResponse;

/// Raised by a [`Transport`](crate::transport::Transport) implementation.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The HTTP request itself failed (DNS, TLS, protocol, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server could not be reached or did not answer in time.
    #[error("Server unreachable: {0}")]
    Unreachable(String),
}

/// Failure of a single request/response round trip.
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    /// No response was received.
    #[error("Network error, check server")]
    Transport(#[source] TransportError),

    /// The server answered with a non-2xx status.
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// `message` / `error` from a JSON body, else the status text.
        message: String,
    },

    /// A body expected to be JSON could not be parsed.
    #[error("Server returned non-JSON content")]
    Malformed(#[source] serde_json::Error),

    /// The request body could not be encoded.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}

impl From<TransportError> for ResponseError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

impl ResponseError {
    /// Build a [`ResponseError::Server`] from a non-success response.
    ///
    /// Prefers a `message` or `error` string in a JSON body, then the
    /// HTTP status text, then a generic `HTTP <status>`.
    pub fn from_status(response: &TransportResponse) -> Self {
        let from_body = serde_json::from_str::<serde_json::Value>(&response.body)
            .ok()
            .and_then(|body| {
                ["message", "error"].iter().find_map(|key| {
                    body.get(key)
                        .and_then(|v| v.as_str())
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                })
            });

        let message = from_body
            .or_else(|| Some(response.status_text.clone()).filter(|s| !s.is_empty()))
            .unwrap_or_else(|| format!("HTTP {}", response.status));

        Self::Server {
            status: response.status,
            message,
        }
    }

    /// HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Error returned by [`AnnotationClient`](crate::AnnotationClient) operations.
#[derive(Debug, thiserror::Error)]
pub enum AnnotationError {
    #[error("Failed to fetch annotations: {0}")]
    Fetch(#[source] ResponseError),

    #[error("Failed to save annotations, please try again: {0}")]
    Save(#[source] ResponseError),

    #[error("Failed to delete annotations, please try again: {0}")]
    Delete(#[source] ResponseError),

    #[error("Failed to export annotations, please try again: {0}")]
    Export(#[source] ResponseError),
}

impl AnnotationError {
    /// The round-trip failure underneath the operation.
    pub fn cause(&self) -> &ResponseError {
        match self {
            Self::Fetch(e) | Self::Save(e) | Self::Delete(e) | Self::Export(e) => e,
        }
    }
}
