//! Browser header profile attached to every coin API request.

use super::transport::Method;
use crate::user_agent;

/// Builds the request headers for `method`, carrying the raw session cookie.
///
/// GET requests add `pragma: no-cache`; POST requests add the JSON content type.
pub(crate) fn browser_headers(method: Method, cookie: &str) -> Vec<(&'static str, String)> {
    let mut headers = vec![
        ("accept", "application/json".to_string()),
        ("accept-language", "en-US,en;q=0.8".to_string()),
        ("cache-control", "no-cache".to_string()),
    ];

    match method {
        Method::Get => headers.push(("pragma", "no-cache".to_string())),
        Method::Post => headers.push((
            "content-type",
            "application/json;charset=UTF-8".to_string(),
        )),
    }

    headers.extend([
        ("cookie", cookie.to_string()),
        ("sec-ch-ua", user_agent::client_hint_brands()),
        ("sec-ch-ua-mobile", "?0".to_string()),
        (
            "sec-ch-ua-platform",
            user_agent::CLIENT_HINT_PLATFORM.to_string(),
        ),
        ("sec-fetch-dest", "empty".to_string()),
        ("sec-fetch-mode", "cors".to_string()),
        ("sec-fetch-site", "same-origin".to_string()),
        ("user-agent", user_agent::browser_user_agent()),
    ]);

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value<'a>(headers: &'a [(&'static str, String)], name: &str) -> Option<&'a str> {
        headers
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    #[test]
    fn test_get_headers_have_pragma_and_no_content_type() {
        let headers = browser_headers(Method::Get, "a=1");
        assert_eq!(value(&headers, "pragma"), Some("no-cache"));
        assert_eq!(value(&headers, "content-type"), None);
        assert_eq!(value(&headers, "cookie"), Some("a=1"));
    }

    #[test]
    fn test_post_headers_have_json_content_type() {
        let headers = browser_headers(Method::Post, "a=1");
        assert_eq!(
            value(&headers, "content-type"),
            Some("application/json;charset=UTF-8")
        );
        assert_eq!(value(&headers, "pragma"), None);
    }

    #[test]
    fn test_cookie_is_passed_verbatim() {
        let raw = "SPC_EC=x%3D; shopee_webUnique_ccd=a%2Bb";
        let headers = browser_headers(Method::Post, raw);
        assert_eq!(value(&headers, "cookie"), Some(raw));
    }

    #[test]
    fn test_header_names_are_unique_and_lowercase() {
        let headers = browser_headers(Method::Get, "a=1");
        let mut names: Vec<&str> = headers.iter().map(|(name, _)| *name).collect();
        assert!(names.iter().all(|name| *name == name.to_ascii_lowercase()));
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
