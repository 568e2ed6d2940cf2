//! Session cookie handling.
//!
//! The session is a raw `Cookie` header copied from a logged-in browser.
//! This module parses it into named fields so individual values (such as the
//! device fingerprint) can be extracted.

mod cookies;

pub use cookies::{CookieMap, parse_cookie};

/// Cookie carrying the device fingerprint required by the check-in endpoint.
pub const FINGERPRINT_COOKIE: &str = "shopee_webUnique_ccd";
