//! HTTP client for the media labels endpoints.
//!
//! [`AnnotationClient`] composes the scope, transform and stats logic
//! from `specimark-core` with an injected [`Transport`]. The production
//! transport is [`HttpTransport`] (reqwest); tests substitute an
//! in-memory fake.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;

pub use client::AnnotationClient;
pub use config::ClientConfig;
pub use error::{AnnotationError, ResponseError, TransportError};
pub use http::HttpTransport;
pub use transport::{Transport, TransportResponse};
