//! # Transport
//!
//! The seam between channels and the network. Channels only ever issue
//! `GET`s and only need the status and the body text, so the trait is that
//! narrow. [`HttpTransport`] is the reqwest implementation; tests substitute
//! scripted fakes.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;

use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Body text
    pub body: String,
}

impl RawResponse {
    /// A `200 OK` response.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body of a 2xx response, or [`Error::HttpStatus`].
    pub fn into_success_body(self, url: &str) -> Result<String> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(Error::HttpStatus {
                status: self.status,
                url: url.to_string(),
            })
        }
    }
}

/// Read-only HTTP access used by every channel.
///
/// Implementations report transport failures (connection, timeout) as
/// errors and return any HTTP status as data.
#[async_trait]
pub trait Transport: Send + Sync {
    /// `GET url`
    async fn get(&self, url: &str) -> Result<RawResponse>;
}

/// reqwest-backed [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a client with the configured deadline and user agent.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::InvalidConfig(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<RawResponse> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::trace!(url, status, bytes = body.len(), "response received");
        Ok(RawResponse { status, body })
    }
}
