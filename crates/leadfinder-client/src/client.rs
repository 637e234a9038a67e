//! HTTP client for the places-search backend.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use leadfinder_core::{AppConfig, SearchRequest};
use leadfinder_stream::SearchResult;

use crate::error::ClientError;

const ZIP_SEARCH_PATH: &str = "/search_zip_codes";
const REGION_SEARCH_PATH: &str = "/search_carwashes_regions";

/// HTTP client for the two search endpoints.
///
/// The underlying `reqwest::Client` carries a connect timeout but no total
/// request timeout: the zip-code search response streams for as long as the
/// backend keeps searching, and a stalled stream is the session's problem to
/// cancel, not this client's to cut off. Single-shot requests (region
/// search) apply `request_timeout_secs` per request instead.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: Client,
    base_url: String,
    request_timeout_secs: u64,
}

impl SearchClient {
    /// Creates a `SearchClient` with configured connect timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        base_url: &str,
        request_timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            request_timeout_secs,
        })
    }

    /// Convenience constructor from loaded configuration.
    ///
    /// # Errors
    ///
    /// Same as [`SearchClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(
            &config.backend_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Opens the streamed zip-code search and returns the response once the
    /// status line has been checked. The caller drains the body.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] — connection or TLS failure.
    /// - [`ClientError::UnexpectedStatus`] — any non-2xx status; the body is
    ///   not consumed in that case.
    pub async fn open_zip_code_stream(
        &self,
        request: &SearchRequest,
    ) -> Result<reqwest::Response, ClientError> {
        let url = self.endpoint(ZIP_SEARCH_PATH);
        tracing::debug!(%url, zip_codes = request.zip_codes.len(), "opening zip code search stream");

        let response = self.http.post(&url).json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }
        Ok(response)
    }

    /// Single-shot free-text region search.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] — network failure or timeout.
    /// - [`ClientError::UnexpectedStatus`] — non-2xx status.
    /// - [`ClientError::Backend`] — 2xx response whose body carries an
    ///   `error` key instead of results.
    /// - [`ClientError::Deserialize`] — body is not the expected shape.
    pub async fn search_region(&self, region: &str) -> Result<SearchResult, ClientError> {
        let url = self.endpoint(REGION_SEARCH_PATH);
        tracing::debug!(%url, region, "searching by region");

        let response = self
            .http
            .post(&url)
            .timeout(Duration::from_secs(self.request_timeout_secs))
            .json(&serde_json::json!({ "region": region }))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let value: Value =
            serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
                context: format!("region search response from {url}"),
                source: e,
            })?;

        if let Some(message) = value.get("error").and_then(Value::as_str) {
            return Err(ClientError::Backend {
                message: message.to_owned(),
            });
        }

        serde_json::from_value::<SearchResult>(value).map_err(|e| ClientError::Deserialize {
            context: format!("region search result from {url}"),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
