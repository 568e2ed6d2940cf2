//! Coinbot Core Library
//!
//! Client for the storefront's coin reward API, driven by a session cookie
//! copied from a logged-in browser. It reads the coin balance, performs the
//! daily check-in, fetches the seven-day check-in history and resolves the
//! logged-in username.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`auth`] - Session cookie parsing
//! - [`api`] - Coin API client, response classification and transport

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod auth;
#[cfg(test)]
pub(crate) mod test_support;
pub(crate) mod user_agent;

// Re-export commonly used types
pub use api::{
    ApiError, CheckinHistory, CheckinOutcome, ClientTimeouts, CoinClient, DEFAULT_BASE_URL,
    ReqwestTransport, Transport,
};
pub use auth::{CookieMap, FINGERPRINT_COOKIE, parse_cookie};
