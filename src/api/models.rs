//! Wire types for coin API responses and the values returned to callers.
//!
//! Each wire type declares only the fields its operation reads, all optional,
//! so unrelated or missing fields never fail a decode. The user id is read
//! straight from the JSON so the logged-out check runs before any decode.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ApiError;

/// Number of days in the check-in window.
pub const CHECKIN_WINDOW_DAYS: usize = 7;

// ==================== Wire Types ====================

/// Balance read from the coins endpoint body.
///
/// The coins endpoint puts its fields next to `code`/`msg` rather than under `data`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct CoinsBalance {
    pub coins: Option<i64>,
}

/// Username read from the coins endpoint body.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct LoginUser {
    pub username: Option<String>,
}

/// `data` of the check-in endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CheckinData {
    pub success: bool,
    pub increase_coins: Option<i64>,
}

/// `data` of the settings endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct SettingsData {
    pub checked_in_today: Option<bool>,
    /// One-based index of today within `checkin_list`.
    pub today_index: Option<i64>,
    pub checkin_list: Option<Vec<i64>>,
}

/// Returns the value of a required field or a structural error naming it.
pub(crate) fn require<T>(value: Option<T>, endpoint: &str, field: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::structural(format!("{endpoint}: missing `{field}`")))
}

/// Deserializes `payload` into `T`, mapping shape mismatches to [`ApiError::Structural`].
pub(crate) fn decode_body<T>(endpoint: &str, payload: Value) -> Result<T, ApiError>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_value(payload).map_err(|e| ApiError::structural(format!("{endpoint}: {e}")))
}

/// Takes the `data` member out of an envelope.
///
/// A missing or `null` `data` is a structural error.
pub(crate) fn take_data(endpoint: &str, mut payload: Value) -> Result<Value, ApiError> {
    payload
        .get_mut("data")
        .map(Value::take)
        .filter(|data| !data.is_null())
        .ok_or_else(|| ApiError::structural(format!("{endpoint}: response has no `data`")))
}

/// Deserializes the `data` member of an envelope into `T`.
pub(crate) fn decode_data<T>(endpoint: &str, payload: Value) -> Result<T, ApiError>
where
    T: for<'de> Deserialize<'de>,
{
    decode_body(endpoint, take_data(endpoint, payload)?)
}

/// Reads `userid` when it is a string, whatever shape the rest of `object` has.
pub(crate) fn user_id(object: &Value) -> Option<&str> {
    object.get("userid").and_then(Value::as_str)
}

// ==================== Caller-Facing Types ====================

/// Result of a check-in attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckinOutcome {
    /// Check-in succeeded and credited this many coins.
    Rewarded(i64),
    /// The attempt was accepted but yielded nothing (e.g. already claimed today).
    NoReward,
}

impl CheckinOutcome {
    /// Coins gained, or `None` for [`CheckinOutcome::NoReward`].
    #[must_use]
    pub fn coins(self) -> Option<i64> {
        match self {
            Self::Rewarded(coins) => Some(coins),
            Self::NoReward => None,
        }
    }
}

/// Rolling seven-day check-in history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckinHistory {
    /// Coin amounts for each day of the window.
    pub amounts: [i64; CHECKIN_WINDOW_DAYS],
    /// Whether today's check-in has already been done.
    pub checked_in_today: bool,
    /// Zero-based index of today within `amounts`.
    pub today_index: i64,
}

impl CheckinHistory {
    /// Builds the history from settings `data`.
    ///
    /// Keeps the first seven entries of `checkin_list` and converts the
    /// upstream one-based `today_index` to zero-based.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Structural`] when a field is missing or the list
    /// has fewer than seven entries.
    pub(crate) fn from_settings(endpoint: &str, settings: SettingsData) -> Result<Self, ApiError> {
        let list = require(settings.checkin_list, endpoint, "checkin_list")?;
        let found = list.len();
        let amounts: [i64; CHECKIN_WINDOW_DAYS] = list
            .get(..CHECKIN_WINDOW_DAYS)
            .and_then(|window| window.try_into().ok())
            .ok_or_else(|| {
                ApiError::structural(format!(
                    "{endpoint}: unexpected checkin history length {found} (expected at least {CHECKIN_WINDOW_DAYS})"
                ))
            })?;

        let checked_in_today = require(settings.checked_in_today, endpoint, "checked_in_today")?;
        let today_index = require(settings.today_index, endpoint, "today_index")?;

        Ok(Self {
            amounts,
            checked_in_today,
            today_index: today_index - 1,
        })
    }
}
