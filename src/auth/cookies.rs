//! Raw `Cookie` header parser.
//!
//! Splits a browser `Cookie` header string (`name1=value1; name2=value2`) into
//! a [`CookieMap`]. Values are kept exactly as transmitted, including percent
//! encoding; [`CookieMap::decoded`] decodes a single field on demand.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, instrument};

/// Cookie name → raw (still percent-encoded) cookie value.
///
/// Values are redacted in Debug output to prevent accidental logging of
/// session secrets.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CookieMap {
    entries: HashMap<String, String>,
}

impl CookieMap {
    /// Returns the raw value for `name`, if present.
    ///
    /// Cookie values are sensitive — avoid logging the return value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Returns the percent-decoded value for `name`.
    ///
    /// Returns `None` when the cookie is absent or its value is not valid
    /// UTF-8 after decoding.
    #[must_use]
    pub fn decoded(&self, name: &str) -> Option<String> {
        let raw = self.get(name)?;
        urlencoding::decode(raw).ok().map(|value| value.into_owned())
    }

    /// Returns true if a cookie named `name` is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of distinct cookie names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no cookies were parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over cookie names in arbitrary order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

// Custom Debug impl that lists names only.
impl fmt::Debug for CookieMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("CookieMap")
            .field("names", &names)
            .field("values", &"[REDACTED]")
            .finish()
    }
}

/// Parses a raw `Cookie` header string into a [`CookieMap`].
///
/// Segments are separated by `;` and trimmed at both ends. Each segment is
/// split on the first `=`: the name is trimmed and the value is kept exactly
/// as sent, percent encoding and inner whitespace included. Segments without `=` or with an empty name are skipped; a
/// repeated name keeps its last value.
#[instrument(level = "debug", skip(raw), fields(len = raw.len()))]
#[must_use]
pub fn parse_cookie(raw: &str) -> CookieMap {
    let mut entries = HashMap::new();
    let mut skipped = 0usize;

    for segment in raw.split(';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }

        match segment.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                entries.insert(name.trim().to_string(), value.to_string());
            }
            _ => skipped += 1,
        }
    }

    debug!(cookies = entries.len(), skipped, "parsed cookie header");
    CookieMap { entries }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cookie_two_pairs() {
        let map = parse_cookie("a=1; b=2");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some("1"));
        assert_eq!(map.get("b"), Some("2"));
    }

    #[test]
    fn test_parse_cookie_keys_are_case_sensitive() {
        let map = parse_cookie("Token=upper; token=lower");
        assert_eq!(map.get("Token"), Some("upper"));
        assert_eq!(map.get("token"), Some("lower"));
        assert_eq!(map.get("TOKEN"), None);
    }

    #[test]
    fn test_parse_cookie_empty_string_yields_empty_map() {
        let map = parse_cookie("");
        assert!(map.is_empty());
    }

    #[test]
    fn test_parse_cookie_skips_segments_without_equals() {
        let map = parse_cookie("garbage; a=1;; =orphan; b=2");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some("1"));
        assert_eq!(map.get("b"), Some("2"));
    }

    #[test]
    fn test_parse_cookie_value_keeps_everything_after_first_equals() {
        let map = parse_cookie("SPC_EC=abc==; csrftoken=x=y");
        assert_eq!(map.get("SPC_EC"), Some("abc=="));
        assert_eq!(map.get("csrftoken"), Some("x=y"));
    }

    #[test]
    fn test_parse_cookie_preserves_percent_encoding() {
        let map = parse_cookie("shopee_webUnique_ccd=a%2Bb%3D%3D");
        assert_eq!(map.get("shopee_webUnique_ccd"), Some("a%2Bb%3D%3D"));
        assert_eq!(
            map.decoded("shopee_webUnique_ccd").as_deref(),
            Some("a+b==")
        );
    }

    #[test]
    fn test_parse_cookie_value_whitespace_is_kept() {
        let map = parse_cookie("  note= two  words ; name =x");
        assert_eq!(map.get("note"), Some(" two  words"));
        assert_eq!(map.get("name"), Some("x"));
    }

    #[test]
    fn test_parse_cookie_last_duplicate_wins() {
        let map = parse_cookie("a=1; a=2");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("a"), Some("2"));
    }

    #[test]
    fn test_parse_cookie_empty_value_is_kept() {
        let map = parse_cookie("empty=; a=1");
        assert!(map.contains("empty"));
        assert_eq!(map.get("empty"), Some(""));
    }

    #[test]
    fn test_decoded_missing_cookie_is_none() {
        let map = parse_cookie("a=1");
        assert!(map.decoded("missing").is_none());
    }

    #[test]
    fn test_cookie_map_debug_redacts_values() {
        let map = parse_cookie("session=super-secret-value; a=1");
        let debug = format!("{map:?}");
        assert!(debug.contains("session"), "names should be listed: {debug}");
        assert!(debug.contains("[REDACTED]"));
        assert!(
            !debug.contains("super-secret-value"),
            "value must not leak: {debug}"
        );
    }
}
