//! Response classification for coin API payloads.
//!
//! Most endpoints wrap their result in a `{code, msg, data?}` envelope. A
//! payload that matches the envelope schema is classified by its `code`; any
//! other payload passes through untouched for the operation to interpret.

use serde::Deserialize;
use serde_json::{Number, Value};
use tracing::{debug, warn};

use super::ApiError;

/// Envelope code for a successful call.
pub const SUCCESS_CODE: f64 = 0.0;

/// Envelope code for a session that is not logged in.
pub const UNAUTHENTICATED_CODE: f64 = 401.0;

/// User id the service reports for a logged-out session inside a successful envelope.
pub const LOGGED_OUT_USER_ID: &str = "-1";

/// The generic envelope header: a numeric `code` and a string `msg`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Envelope {
    /// Status code; `0` means success. Kept as a JSON number so `401.0` and
    /// `7.5` classify the same way the server sent them.
    pub code: Number,
    /// Human-readable server message.
    pub msg: String,
}

impl Envelope {
    /// Matches `payload` against the envelope schema.
    ///
    /// Returns `None` for non-objects and for objects whose `code` is not a
    /// number or whose `msg` is not a string.
    #[must_use]
    pub fn from_payload(payload: &Value) -> Option<Self> {
        // Structs also deserialize from sequences, so only objects are considered.
        if !payload.is_object() {
            return None;
        }
        Self::deserialize(payload).ok()
    }
}

/// Outcome of classifying one response payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Envelope with code `0`.
    Success,
    /// Envelope with code `401`.
    Unauthenticated,
    /// Envelope with any other non-zero code.
    Rejected {
        /// Envelope `code`.
        code: Number,
        /// Envelope `msg`.
        message: String,
    },
    /// Payload is not an envelope; left for the operation to interpret.
    Passthrough,
}

impl Classification {
    /// Converts the classification into the error the caller should see, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnauthenticatedSession`] for `Unauthenticated` and
    /// [`ApiError::RemoteDomain`] for `Rejected`.
    pub fn into_result(self) -> Result<(), ApiError> {
        match self {
            Self::Success | Self::Passthrough => Ok(()),
            Self::Unauthenticated => Err(ApiError::UnauthenticatedSession),
            Self::Rejected { code, message } => Err(ApiError::remote_domain(code, message)),
        }
    }
}

/// Classifies a decoded response payload.
#[must_use]
pub fn classify(payload: &Value) -> Classification {
    match Envelope::from_payload(payload) {
        None => Classification::Passthrough,
        Some(envelope) if envelope.code_is(UNAUTHENTICATED_CODE) => {
            Classification::Unauthenticated
        }
        Some(envelope) if envelope.code_is(SUCCESS_CODE) => Classification::Success,
        Some(Envelope { code, msg }) => Classification::Rejected { code, message: msg },
    }
}

/// Classifies `payload` and fails on unauthenticated or rejected envelopes.
///
/// # Errors
///
/// See [`Classification::into_result`].
pub fn ensure_success(endpoint: &str, payload: &Value) -> Result<(), ApiError> {
    let classification = classify(payload);
    match &classification {
        Classification::Success => debug!(endpoint, "envelope ok"),
        Classification::Passthrough => debug!(endpoint, "payload is not an envelope; passing through"),
        Classification::Unauthenticated => warn!(endpoint, "server reports session not logged in"),
        Classification::Rejected { code, message } => {
            warn!(endpoint, %code, message = %message, "server rejected request");
        }
    }
    classification.into_result()
}

/// Fails with [`ApiError::UnauthenticatedSession`] when `user_id` is the logged-out sentinel.
///
/// An absent user id is not treated as logged out.
///
/// # Errors
///
/// Returns [`ApiError::UnauthenticatedSession`] when `user_id == "-1"`.
pub fn ensure_logged_in(user_id: Option<&str>) -> Result<(), ApiError> {
    if user_id == Some(LOGGED_OUT_USER_ID) {
        warn!("server reports logged-out user id");
        return Err(ApiError::UnauthenticatedSession);
    }
    Ok(())
}
