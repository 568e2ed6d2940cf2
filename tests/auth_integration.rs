//! Integration tests for session cookie parsing and secret handling.

use std::sync::Arc;

use coinbot_core::api::{ApiRequest, Method};
use coinbot_core::{
    ApiError, CoinClient, FINGERPRINT_COOKIE, ReqwestTransport, parse_cookie,
};

const BROWSER_COOKIE: &str = "_gcl_au=1.1.2; SPC_F=abcDEF; REC_T_ID=9f8e; \
    SPC_EC=c2VjcmV0LXNlc3Npb24=; shopee_webUnique_ccd=xY%2B1%2Fz%3D%3D%7C2023; csrftoken=tok";

#[test]
fn test_parse_realistic_browser_cookie() {
    let cookies = parse_cookie(BROWSER_COOKIE);

    assert_eq!(cookies.len(), 6);
    assert_eq!(cookies.get("SPC_EC"), Some("c2VjcmV0LXNlc3Npb24="));
    assert_eq!(cookies.get(FINGERPRINT_COOKIE), Some("xY%2B1%2Fz%3D%3D%7C2023"));
    assert_eq!(
        cookies.decoded(FINGERPRINT_COOKIE).as_deref(),
        Some("xY+1/z==|2023")
    );
}

#[test]
fn test_parse_tolerates_malformed_segments() {
    let cookies = parse_cookie("; ;novalue; a=1; =; b=2;");
    assert_eq!(cookies.len(), 2);
    assert_eq!(cookies.get("a"), Some("1"));
    assert_eq!(cookies.get("b"), Some("2"));
}

#[test]
fn test_client_debug_does_not_contain_session_secret() {
    let transport = Arc::new(ReqwestTransport::new().unwrap());
    let client = CoinClient::with_transport(BROWSER_COOKIE, "https://shopee.tw", transport).unwrap();

    let debug = format!("{client:?}");
    assert!(
        !debug.contains("c2VjcmV0LXNlc3Npb24"),
        "CoinClient Debug must not contain the session cookie: {debug}"
    );
}

#[test]
fn test_request_debug_does_not_contain_session_secret() {
    let request = ApiRequest {
        method: Method::Get,
        url: "https://shopee.tw/mkt/coins/api/v1/cs/coins".to_string(),
        headers: vec![("cookie", BROWSER_COOKIE.to_string())],
        body: None,
    };

    let debug = format!("{request:?}");
    assert!(
        !debug.contains("c2VjcmV0LXNlc3Npb24"),
        "ApiRequest Debug must not contain the session cookie: {debug}"
    );
}

#[test]
fn test_cookie_map_debug_does_not_contain_values() {
    let debug = format!("{:?}", parse_cookie(BROWSER_COOKIE));
    assert!(debug.contains("SPC_EC"));
    assert!(!debug.contains("c2VjcmV0LXNlc3Npb24"));
}

#[test]
fn test_error_messages_do_not_contain_session_secret() {
    let errors = [
        ApiError::invalid_cookie(format!("Missing required cookie: {FINGERPRINT_COOKIE}")),
        ApiError::UnauthenticatedSession,
        ApiError::remote_domain(7, "quota exceeded"),
        ApiError::structural("settings: missing `checkin_list`"),
    ];
    for error in errors {
        let msg = error.to_string();
        assert!(!msg.contains("c2VjcmV0LXNlc3Npb24"), "leaked in: {msg}");
    }
}
