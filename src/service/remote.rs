//! Live data endpoint client
//!
//! Fetches JSON documents from the configured safety data provider. Each
//! request carries the caller's wait as its timeout; this client never
//! retries.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Client for the live safety data provider
#[derive(Clone)]
pub struct RemoteDataClient {
    client: Client,
    api_key: String,
}

impl RemoteDataClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .user_agent(concat!("safetransit/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
        })
    }

    /// GET `url` with `query` and decode the body as `T`, giving up after `timeout`
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        query: &[(&str, String)],
        timeout: Duration,
    ) -> Result<T, RemoteError> {
        tracing::debug!(url = %url, query = ?query, timeout_ms = timeout.as_millis(), "Fetching live data");

        let response = self
            .client
            .get(url.clone())
            .query(query)
            .header(API_KEY_HEADER, &self.api_key)
            .timeout(timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Status { status, body });
        }

        let body = response.text().await?;
        let decoded = serde_json::from_str(&body)
            .map_err(|e| RemoteError::ParseError(format!("Failed to deserialize body: {}", e)))?;

        tracing::debug!(url = %url, body_length = body.len(), "Fetched live data");

        Ok(decoded)
    }
}
