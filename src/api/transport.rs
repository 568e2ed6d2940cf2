//! HTTP transport seam for the coin client.
//!
//! [`Transport`] is the only thing the client needs from the network: send a
//! request with headers and an optional JSON body, get back decoded JSON or a
//! transport failure. [`ReqwestTransport`] is the production implementation;
//! tests substitute their own.

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Proxy};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::ApiError;
use crate::user_agent;

/// Default connect timeout for API calls.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default total request timeout for API calls.
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;

/// HTTP method used by the coin endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

impl Method {
    /// Uppercase method name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// A fully prepared API request.
#[derive(Clone)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute endpoint URL.
    pub url: String,
    /// Header name/value pairs, names lowercase.
    pub headers: Vec<(&'static str, String)>,
    /// Optional JSON body.
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Returns the first value of header `name` (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

// Custom Debug impl that redacts the cookie header.
impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(name, value)| {
                if name.eq_ignore_ascii_case("cookie") {
                    (*name, "[REDACTED]")
                } else {
                    (*name, value.as_str())
                }
            })
            .collect();
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &headers)
            .field("body", &self.body)
            .finish()
    }
}

/// Sends API requests and decodes JSON responses.
///
/// Uses `async_trait` so the client can hold a `dyn Transport`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the decoded JSON body.
    ///
    /// Implementations must not interpret the payload; classification is the
    /// client's job.
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError>;
}

/// Connect and read timeouts for [`ReqwestTransport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientTimeouts {
    /// TCP/TLS connect timeout in seconds.
    pub connect_secs: u64,
    /// Whole-request timeout in seconds.
    pub read_secs: u64,
}

impl Default for ClientTimeouts {
    fn default() -> Self {
        Self {
            connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            read_secs: DEFAULT_READ_TIMEOUT_SECS,
        }
    }
}

/// [`Transport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuild`] when client construction fails.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_timeouts(ClientTimeouts::default())
    }

    /// Creates a transport with explicit timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuild`] when client construction fails.
    pub fn with_timeouts(timeouts: ClientTimeouts) -> Result<Self, ApiError> {
        let client = build_http_client(timeouts)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = request.method.as_str(), url = %request.url))]
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }
        if let Some(body) = &request.body {
            // Content type comes from the header profile, not from `.json()`.
            builder = builder.body(body.to_string());
        }

        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, "coin API request failed");
            ApiError::transport(&request.url, e)
        })?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "coin API returned error status");
            return Err(ApiError::http_status(&request.url, status.as_u16()));
        }

        response.json::<Value>().await.map_err(|e| {
            warn!(error = %e, "coin API response is not JSON");
            ApiError::transport(&request.url, e)
        })
    }
}

// ==================== Client Construction ====================

enum BuildClientFailure {
    Panic,
    Build(reqwest::Error),
}

fn build_http_client(timeouts: ClientTimeouts) -> Result<Client, ApiError> {
    match try_build_client(timeouts, false) {
        Ok(client) => Ok(client),
        Err(BuildClientFailure::Panic) => {
            // Some sandboxed environments panic when querying system proxy
            // settings; retry with env proxies only.
            warn!("HTTP client hit system proxy panic; using env-proxy fallback builder");
            match try_build_client(timeouts, true) {
                Ok(client) => Ok(client),
                Err(BuildClientFailure::Panic) => Err(ApiError::ClientBuild {
                    reason: "client construction panicked while reading proxy settings"
                        .to_string(),
                }),
                Err(BuildClientFailure::Build(error)) => Err(ApiError::ClientBuild {
                    reason: error.to_string(),
                }),
            }
        }
        Err(BuildClientFailure::Build(error)) => Err(ApiError::ClientBuild {
            reason: error.to_string(),
        }),
    }
}

fn try_build_client(
    timeouts: ClientTimeouts,
    disable_system_proxy_lookup: bool,
) -> Result<Client, BuildClientFailure> {
    catch_unwind(AssertUnwindSafe(move || {
        let mut builder = base_builder(timeouts);
        if disable_system_proxy_lookup {
            builder = apply_env_proxy_fallback(builder.no_proxy());
        }
        builder.build().map_err(BuildClientFailure::Build)
    }))
    .map_err(|_| BuildClientFailure::Panic)?
}

fn base_builder(timeouts: ClientTimeouts) -> ClientBuilder {
    Client::builder()
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .timeout(Duration::from_secs(timeouts.read_secs))
        .user_agent(user_agent::browser_user_agent())
        .gzip(true)
}

fn apply_env_proxy_fallback(mut builder: ClientBuilder) -> ClientBuilder {
    if let Some(proxy) = env_proxy_for_scheme("https")
        && let Ok(resolved) = Proxy::https(&proxy)
    {
        builder = builder.proxy(resolved);
    }
    if let Some(proxy) = env_proxy_for_scheme("http")
        && let Ok(resolved) = Proxy::http(&proxy)
    {
        builder = builder.proxy(resolved);
    }
    builder
}

fn env_proxy_for_scheme(scheme: &str) -> Option<String> {
    match scheme {
        "https" => find_first_proxy_var(&["HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"]),
        "http" => find_first_proxy_var(&["HTTP_PROXY", "http_proxy", "ALL_PROXY", "all_proxy"]),
        _ => None,
    }
}

fn find_first_proxy_var(names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        std::env::var(name)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}
