//! HTTP transport for envelope payloads.
//!
//! The [`Transport`] trait is the seam between the protocol logic and the
//! network: production code uses [`HttpTransport`] (reqwest), tests inject
//! stubs with canned responses and call counters.

use crate::error::{BoxError, Error};
use async_trait::async_trait;
use std::time::Duration;

/// Default per-request timeout applied when the caller does not override
/// it at construction.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport configuration fixed at client construction.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Bounds every downstream call, including the login handshake.
    pub timeout: Duration,
    /// Disables TLS certificate verification. Off unless a caller opts in
    /// explicitly, e.g. for a self-signed staging server.
    pub danger_accept_invalid_certs: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            danger_accept_invalid_certs: false,
        }
    }
}

/// A raw transport-level response: status plus full body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Posts serialized envelopes to a service endpoint.
///
/// Implementations must be safe for concurrent use; one transport instance
/// is shared by all service clients of a `Polarion` handle.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POSTs `body` to `url` with the given `SOAPAction` header value and
    /// returns the status and body, regardless of status code.
    async fn post(
        &self,
        url: &str,
        soap_action: &str,
        body: String,
    ) -> std::result::Result<TransportResponse, BoxError>;
}

/// The production transport, backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &TransportConfig) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder().timeout(config.timeout);
        if config.danger_accept_invalid_certs {
            tracing::warn!("TLS certificate verification is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }
        let client = builder.build().map_err(|err| Error::TransportInit {
            source: Box::new(err),
        })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(
        &self,
        url: &str,
        soap_action: &str,
        body: String,
    ) -> std::result::Result<TransportResponse, BoxError> {
        let response = self
            .client
            .post(url)
            .header("Content-Type", "text/xml; charset=utf-8")
            .header("SOAPAction", soap_action)
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }
}
