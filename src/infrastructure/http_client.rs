//! HTTP client for fetching dictionary search pages
//!
//! One GET per lookup. Any non-success status aborts the lookup; retry and
//! rate limiting are deliberately absent.

use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::infrastructure::config::defaults;
use crate::infrastructure::error::{DictError, DictResult};

/// Configuration for HTTP client behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
    /// Whether to follow redirects
    pub follow_redirects: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: defaults::REQUEST_TIMEOUT_SECONDS,
            user_agent: defaults::USER_AGENT.to_string(),
            follow_redirects: true,
        }
    }
}

/// HTTP client for the dictionary service
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> DictResult<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> DictResult<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(&config.user_agent)
            .gzip(true)
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(10)
            } else {
                reqwest::redirect::Policy::none()
            })
            .build()
            .map_err(|e| DictError::configuration("http", format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub const fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Build the request URL with URL-encoded query parameters
    pub fn build_url(url: &str, params: &[(&str, &str)]) -> DictResult<Url> {
        Url::parse_with_params(url, params).map_err(|e| DictError::UrlResolutionFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }

    /// GET `url` with `params` and return the body text.
    ///
    /// Non-2xx statuses become [`DictError::HttpRequestFailed`].
    pub async fn fetch_html_string(&self, url: &str, params: &[(&str, &str)]) -> DictResult<String> {
        let request_url = Self::build_url(url, params)?;
        info!("🌐 HTTP GET: {}", request_url);

        let response = self
            .client
            .get(request_url.clone())
            .send()
            .await
            .map_err(|source| DictError::Network {
                url: request_url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DictError::HttpRequestFailed {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unknown status")
                    .to_string(),
                url: request_url.to_string(),
            });
        }

        let body = response.text().await.map_err(|source| DictError::Network {
            url: request_url.to_string(),
            source,
        })?;

        debug!("Received {} bytes from {}", body.len(), request_url);
        Ok(body)
    }
}
