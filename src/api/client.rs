//! Session client for the coin reward API.
//!
//! [`CoinClient`] owns one raw session cookie and performs the four coin
//! operations. Every response goes through the envelope classification in
//! [`super::envelope`] before any operation-specific extraction.

use std::fmt;
use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{debug, info, instrument};
use url::Url;

use super::envelope::{ensure_logged_in, ensure_success};
use super::headers::browser_headers;
use super::models::{
    CheckinData, CheckinHistory, CheckinOutcome, CoinsBalance, LoginUser, SettingsData,
    decode_body, decode_data, require, take_data, user_id,
};
use super::transport::{ApiRequest, Method, ReqwestTransport, Transport};
use super::ApiError;
use crate::auth::{FINGERPRINT_COOKIE, parse_cookie};

/// Default storefront origin.
pub const DEFAULT_BASE_URL: &str = "https://shopee.tw";

const COINS_PATH: &str = "mkt/coins/api/v1/cs/coins";
const CHECKIN_PATH: &str = "mkt/coins/api/v2/checkin_new";
const SETTINGS_PATH: &str = "mkt/coins/api/v2/settings";

/// Cookie-authenticated client for the coin reward API.
///
/// The session cookie is fixed at construction. The client holds no other
/// mutable state, so it can be cloned and shared across tasks freely.
///
/// # Example
///
/// ```no_run
/// use coinbot_core::CoinClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = CoinClient::new("SPC_EC=...; shopee_webUnique_ccd=...")?;
/// println!("balance: {}", client.get_balance().await?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CoinClient {
    cookie: String,
    base_url: Url,
    transport: Arc<dyn Transport>,
}

impl CoinClient {
    /// Creates a client against [`DEFAULT_BASE_URL`] with the default transport.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if HTTP client construction fails.
    pub fn new(cookie: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_base_url(cookie, DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom origin (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the base URL is invalid or HTTP client
    /// construction fails.
    pub fn with_base_url(cookie: impl Into<String>, base_url: &str) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new()?;
        Self::with_transport(cookie, base_url, Arc::new(transport))
    }

    /// Creates a client with an explicit transport.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] if `base_url` is not an absolute
    /// http(s) URL.
    pub fn with_transport(
        cookie: impl Into<String>,
        base_url: &str,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            cookie: cookie.into(),
            base_url: parse_base_url(base_url)?,
            transport,
        })
    }

    /// Returns the origin endpoints are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Returns the current coin balance.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-success envelope, or
    /// a payload without `coins`.
    #[instrument(skip(self), fields(endpoint = COINS_PATH))]
    pub async fn get_balance(&self) -> Result<i64, ApiError> {
        let payload = self.call(Method::Get, COINS_PATH, None).await?;
        let body: CoinsBalance = decode_body(COINS_PATH, payload)?;
        let coins = require(body.coins, COINS_PATH, "coins")?;
        debug!(coins, "fetched coin balance");
        Ok(coins)
    }

    /// Performs today's check-in.
    ///
    /// Requires the device fingerprint cookie; its absence fails before any
    /// request is sent. An accepted attempt that credits nothing yields
    /// [`CheckinOutcome::NoReward`] rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidCookie`] when the fingerprint cookie is
    /// missing, and [`ApiError`] on transport failure, a non-success envelope
    /// or a payload without `data`.
    #[instrument(skip(self), fields(endpoint = CHECKIN_PATH))]
    pub async fn checkin(&self) -> Result<CheckinOutcome, ApiError> {
        let dfp = self.fingerprint()?;
        let payload = self
            .call(Method::Post, CHECKIN_PATH, Some(json!({ "dfp": dfp })))
            .await?;
        let data: CheckinData = decode_data(CHECKIN_PATH, payload)?;

        if data.success {
            let coins = require(data.increase_coins, CHECKIN_PATH, "increase_coins")?;
            info!(coins, "check-in rewarded");
            Ok(CheckinOutcome::Rewarded(coins))
        } else {
            info!("check-in accepted without reward");
            Ok(CheckinOutcome::NoReward)
        }
    }

    /// Returns the seven-day check-in history.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnauthenticatedSession`] for a code 401 envelope
    /// or the logged-out user id, and [`ApiError::Structural`] when the
    /// history has fewer than seven entries.
    #[instrument(skip(self), fields(endpoint = SETTINGS_PATH))]
    pub async fn get_checkin_history(&self) -> Result<CheckinHistory, ApiError> {
        let payload = self.call(Method::Get, SETTINGS_PATH, None).await?;
        let data = take_data(SETTINGS_PATH, payload)?;
        ensure_logged_in(user_id(&data))?;
        let settings: SettingsData = decode_body(SETTINGS_PATH, data)?;

        let history = CheckinHistory::from_settings(SETTINGS_PATH, settings)?;
        debug!(
            checked_in_today = history.checked_in_today,
            today_index = history.today_index,
            "fetched check-in history"
        );
        Ok(history)
    }

    /// Returns the username of the logged-in session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnauthenticatedSession`] for a code 401 envelope
    /// or the logged-out user id.
    #[instrument(skip(self), fields(endpoint = COINS_PATH))]
    pub async fn get_login_user(&self) -> Result<String, ApiError> {
        let payload = self.call(Method::Get, COINS_PATH, None).await?;
        ensure_logged_in(user_id(&payload))?;
        let body: LoginUser = decode_body(COINS_PATH, payload)?;
        require(body.username, COINS_PATH, "username")
    }

    /// Sends one request and classifies the response.
    async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let url = self.endpoint(path)?;
        let request = ApiRequest {
            method,
            url: url.clone(),
            headers: browser_headers(method, &self.cookie),
            body,
        };

        debug!(method = method.as_str(), %url, "calling coin API");
        let payload = self.transport.send(request).await?;
        ensure_success(&url, &payload)?;
        Ok(payload)
    }

    fn endpoint(&self, path: &str) -> Result<String, ApiError> {
        self.base_url
            .join(path)
            .map(String::from)
            .map_err(|e| ApiError::invalid_base_url(self.base_url.as_str(), e.to_string()))
    }

    /// Extracts and percent-decodes the device fingerprint cookie.
    fn fingerprint(&self) -> Result<String, ApiError> {
        let cookies = parse_cookie(&self.cookie);
        match cookies.get(FINGERPRINT_COOKIE) {
            None | Some("") => Err(ApiError::invalid_cookie(format!(
                "Missing required cookie: {FINGERPRINT_COOKIE}"
            ))),
            Some(_) => cookies.decoded(FINGERPRINT_COOKIE).ok_or_else(|| {
                ApiError::invalid_cookie(format!(
                    "Cookie {FINGERPRINT_COOKIE} is not valid percent-encoded UTF-8"
                ))
            }),
        }
    }
}

impl fmt::Debug for CoinClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoinClient")
            .field("base_url", &self.base_url.as_str())
            .field("cookie", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// Validates the base URL and normalizes it to end in `/` so relative
/// endpoint paths keep any path prefix.
fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let mut url = Url::parse(raw).map_err(|e| ApiError::invalid_base_url(raw, e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::invalid_base_url(raw, "scheme must be http or https"));
    }
    if url.cannot_be_a_base() {
        return Err(ApiError::invalid_base_url(raw, "URL cannot be a base"));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
