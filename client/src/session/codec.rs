//! Access-token payload decoding.
//!
//! The signature is never checked here. Claims drive routing and display
//! only; the backend remains the authority on every request.

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

/// Claims carried in the access token payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(deserialize_with = "crate::net::types::deserialize_id_string")]
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub date_joined: Option<String>,
    /// Expiry in seconds since the Unix epoch.
    #[serde(default)]
    pub exp: Option<f64>,
}

impl Claims {
    /// A token with no `exp` claim is treated as already expired.
    #[must_use]
    pub fn is_expired(&self, now_secs: f64) -> bool {
        self.exp.is_none_or(|exp| exp <= now_secs)
    }
}

/// Why a token payload could not be read.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid token: missing payload segment")]
    MissingPayload,
    #[error("invalid token payload encoding: {0}")]
    Base64(String),
    #[error("invalid token payload json: {0}")]
    Json(String),
}

/// Decode the claims from the second dot-separated segment of `token`.
///
/// # Errors
///
/// Returns [`DecodeError`] if the segment is missing, is not base64url, or
/// does not hold a claims object.
pub fn decode_claims(token: &str) -> Result<Claims, DecodeError> {
    let payload = token
        .split('.')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or(DecodeError::MissingPayload)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| DecodeError::Base64(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| DecodeError::Json(e.to_string()))
}
