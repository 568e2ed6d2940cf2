//! Error types for coin API operations.
//!
//! Every public operation returns `Result<T, ApiError>`. Classification and
//! validation failures get their own variants; transport failures are carried
//! through without reinterpretation.

use serde_json::Number;
use thiserror::Error;

/// Errors that can occur while talking to the coin API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The session cookie lacks a field required by the operation.
    ///
    /// Raised before any request is sent.
    #[error("invalid cookie: {reason}\n  Suggestion: {suggestion}")]
    InvalidCookie {
        /// What is missing or malformed.
        reason: String,
        /// How to fix the issue.
        suggestion: &'static str,
    },

    /// The remote service reports the session as not logged in.
    ///
    /// Covers both the envelope code 401 and the `"-1"` user-id sentinel.
    #[error(
        "[AUTH] session is not logged in\n  Suggestion: copy a fresh cookie from a logged-in browser"
    )]
    UnauthenticatedSession,

    /// The remote service understood the request but declined it.
    #[error("server rejected request (code {code}): {message}")]
    RemoteDomain {
        /// Envelope `code` as returned by the server.
        code: Number,
        /// Envelope `msg` as returned by the server.
        message: String,
    },

    /// A successful envelope does not have the shape the operation needs.
    #[error("unexpected response shape: {context}")]
    Structural {
        /// Which invariant was violated.
        context: String,
    },

    /// Network-level or body decoding failure from the HTTP client.
    #[error("transport error calling {endpoint}: {source}")]
    Transport {
        /// The endpoint URL that failed.
        endpoint: String,
        /// The underlying HTTP client error.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success HTTP status.
    #[error("HTTP {status} calling {endpoint}")]
    HttpStatus {
        /// The endpoint URL that returned the status.
        endpoint: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The configured base URL cannot be used to build endpoint URLs.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected base URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The HTTP client could not be constructed.
    #[error("HTTP client construction failed: {reason}")]
    ClientBuild {
        /// Why construction failed.
        reason: String,
    },
}

impl ApiError {
    /// Creates an `InvalidCookie` error.
    #[must_use]
    pub fn invalid_cookie(reason: impl Into<String>) -> Self {
        Self::InvalidCookie {
            reason: reason.into(),
            suggestion: "Copy the full cookie header from a logged-in browser session",
        }
    }

    /// Creates a `RemoteDomain` error carrying the envelope code and message verbatim.
    #[must_use]
    pub fn remote_domain(code: impl Into<Number>, message: impl Into<String>) -> Self {
        Self::RemoteDomain {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Creates a `Structural` error.
    #[must_use]
    pub fn structural(context: impl Into<String>) -> Self {
        Self::Structural {
            context: context.into(),
        }
    }

    /// Creates a `Transport` error from a reqwest error.
    #[must_use]
    pub fn transport(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// Creates an `HttpStatus` error.
    #[must_use]
    pub fn http_status(endpoint: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            endpoint: endpoint.into(),
            status,
        }
    }

    /// Creates an `InvalidBaseUrl` error.
    #[must_use]
    pub fn invalid_base_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidBaseUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Returns true when the caller should obtain a new session cookie.
    #[must_use]
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::UnauthenticatedSession | Self::InvalidCookie { .. })
    }
}

// No `From<reqwest::Error>`: transport errors need the endpoint for context,
// so callers go through `ApiError::transport`.
