use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{AppError, GENERIC_FAILURE_MESSAGE};

/// Application-level status codes carried in every backend envelope.
///
/// The HTTP status alone is not authoritative; the backend reports the
/// real outcome through these two-letter codes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ResponseCode {
    Success,
    ValidationFailed,
    DuplicateId,
    NotExistedUser,
    SignInFail,
    AuthorizationFail,
    NoPermission,
    DatabaseError,
}

impl ResponseCode {
    pub fn from_code<S: AsRef<str>>(code: S) -> Option<Self> {
        match code.as_ref().to_uppercase().as_str() {
            "SU" => Some(Self::Success),
            "VF" => Some(Self::ValidationFailed),
            "DI" => Some(Self::DuplicateId),
            "NU" => Some(Self::NotExistedUser),
            "SF" => Some(Self::SignInFail),
            "AF" => Some(Self::AuthorizationFail),
            "NP" => Some(Self::NoPermission),
            "DBE" => Some(Self::DatabaseError),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Success => "SU",
            Self::ValidationFailed => "VF",
            Self::DuplicateId => "DI",
            Self::NotExistedUser => "NU",
            Self::SignInFail => "SF",
            Self::AuthorizationFail => "AF",
            Self::NoPermission => "NP",
            Self::DatabaseError => "DBE",
        }
    }
}

/// Outer response object: status code plus optional human-readable message,
/// wrapped around whatever payload the endpoint returns.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseEnvelope {
    pub code: String,
    pub message: Option<String>,
}

impl ResponseEnvelope {
    /// Read the envelope fields out of a raw response body.
    ///
    /// Returns `None` when the body carries no `code` field at all, which
    /// means the response cannot be interpreted as a backend envelope.
    pub fn from_value(raw: &Value) -> Option<Self> {
        let code = raw.get("code")?.as_str()?.to_string();
        let message = raw
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);
        Some(Self { code, message })
    }

    pub fn is_success(&self) -> bool {
        ResponseCode::from_code(&self.code) == Some(ResponseCode::Success)
    }
}

/// Reject bodies whose envelope reports a non-success code.
///
/// Bodies without any envelope pass through untouched; some endpoints
/// (plant list) answer with bare payloads.
pub fn require_success(raw: &Value) -> Result<(), AppError> {
    match ResponseEnvelope::from_value(raw) {
        Some(envelope) if !envelope.is_success() => Err(AppError::Application(
            envelope
                .message
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
        )),
        _ => Ok(()),
    }
}
