//! Blocking HTTP client
//!
//! Provides the HTTP client request functions use to fetch one page:
//! - Base URL joining and URL validation
//! - Default and per-request headers
//! - Snapshotting request and reply into records a page can keep
//! - Error classification for non-success statuses

use crate::error::{Error, Result};
use crate::response::{RawResponse, RequestRecord, Response};
use crate::types::{JsonValue, Method, StringMap};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for relative paths
    pub base_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: StringMap,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            default_headers: StringMap::new(),
            user_agent: format!("pagechain/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters
    pub query: StringMap,
    /// Request headers
    pub headers: StringMap,
    /// Request body (JSON)
    pub body: Option<JsonValue>,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add several query parameters
    #[must_use]
    pub fn queries(mut self, params: StringMap) -> Self {
        self.query.extend(params);
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Blocking HTTP client that records what it sent and received
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// The client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Make a GET request
    pub fn get(&self, url: &str, config: RequestConfig) -> Result<(RequestRecord, RawResponse)> {
        self.send(Method::GET, url, config)
    }

    /// Make a request and wrap the exchange in a fresh [`Response`]
    pub fn fetch<T>(&self, method: Method, url: &str, config: RequestConfig) -> Result<Response<T>> {
        let (request, raw) = self.send(method, url, config)?;
        Ok(Response::new().with_request(request).with_raw(raw))
    }

    /// Make a generic request
    pub fn send(
        &self,
        method: Method,
        url: &str,
        config: RequestConfig,
    ) -> Result<(RequestRecord, RawResponse)> {
        let full_url = self.build_url(url)?;

        let mut headers = self.config.default_headers.clone();
        headers.extend(config.headers);

        let mut req = self.client.request(method.into(), full_url.as_str());
        for (key, value) in &headers {
            req = req.header(key.as_str(), value.as_str());
        }
        if !config.query.is_empty() {
            req = req.query(&config.query);
        }
        if let Some(ref body) = config.body {
            req = req.json(body);
        }
        if let Some(timeout) = config.timeout {
            req = req.timeout(timeout);
        }

        let response = req.send()?;
        let status = response.status();

        let mut response_headers = StringMap::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                response_headers.insert(name.as_str().to_string(), value.to_string());
            }
        }
        let body = response.text()?;

        if status.is_client_error() || status.is_server_error() {
            warn!("Request failed with {}: {} {}", status.as_u16(), method, full_url);
            return Err(Error::http_status(status.as_u16(), body));
        }

        debug!("Request succeeded: {} {}", method, full_url);

        let request = RequestRecord {
            method,
            url: full_url.to_string(),
            query: config.query,
            headers,
            body: config.body,
        };
        let raw = RawResponse {
            status: status.as_u16(),
            headers: response_headers,
            body,
        };
        Ok((request, raw))
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> Result<Url> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Ok(Url::parse(path)?);
        }

        match &self.config.base_url {
            Some(base) => {
                let base = base.trim_end_matches('/');
                let path = path.trim_start_matches('/');
                Ok(Url::parse(&format!("{base}/{path}"))?)
            }
            None => Ok(Url::parse(path)?),
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
