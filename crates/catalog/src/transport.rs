//! Network transport seam
//!
//! The gateway never talks to the network directly; it goes through
//! [`Transport`], which fetches a URL and returns the parsed JSON body.
//! Production uses [`HttpTransport`] (reqwest); tests substitute scripted
//! doubles.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Errors the transport layer can report.
///
/// These never propagate past the gateway, which converts them into empty
/// results so the aggregator can try other sources.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("upstream returned a non-JSON body: {snippet}")]
    NonJson { snippet: String },
}

pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// Fetch-and-return-JSON collaborator
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET the URL and parse the response body as JSON.
    async fn get_json(&self, url: &Url) -> TransportResult<Value>;
}

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const NON_JSON_SNIPPET_LEN: usize = 100;

/// HTTP transport backed by a shared reqwest client
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, url: &Url) -> TransportResult<Value> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        // Some upstreams send JSON with a text/html content type, and some
        // send plain-text error strings with 200. Read the raw body first
        // and attempt JSON parsing regardless of content type.
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|_| TransportError::NonJson {
            snippet: body.chars().take(NON_JSON_SNIPPET_LEN).collect(),
        })
    }
}
