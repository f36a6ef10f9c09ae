//! Wire types for the session API.
//!
//! Responses are small JSON objects. `maxAge` is read either as a JSON
//! integer or as a base-10 string, since the service has emitted both.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Header carrying the CSRF token on privileged calls.
pub const CSRF_HEADER: &str = "CSRFToken";

/// Failure of a single remote call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The service answered with a non-2xx status.
    #[error("request failed with status {0}")]
    Status(u16),
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// The response body could not be read as the expected payload.
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// `true` when the auth-info endpoint reports the session no longer exists.
    #[must_use]
    pub fn is_session_gone(&self) -> bool {
        matches!(self, Self::Status(404))
    }
}

/// Operation selector passed as the `mode` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiMode {
    Version,
    CsrfToken,
    AuthInfo,
    Logout,
}

impl ApiMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Version => "VERSION",
            Self::CsrfToken => "CSRFTOKEN",
            Self::AuthInfo => "AUTHINFO",
            Self::Logout => "LOGOUT",
        }
    }

    /// Whether the call must carry the [`CSRF_HEADER`].
    #[must_use]
    pub fn is_privileged(self) -> bool {
        matches!(self, Self::AuthInfo | Self::Logout)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VersionInfo {
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthInfo {
    pub user: String,
    /// Remaining session lifetime in seconds, as seen by the server.
    #[serde(rename = "maxAge", deserialize_with = "deserialize_max_age")]
    pub max_age: u64,
}

/// CSRF token issued once per page load.
///
/// Stored trimmed; the value is echoed verbatim in the [`CSRF_HEADER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    /// Build a token from its raw form, rejecting blank values.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if the trimmed value is empty.
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ApiError::Decode("empty CSRF token".to_owned()));
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Deserialize)]
struct CsrfTokenResponse {
    #[serde(rename = "csrfToken")]
    csrf_token: String,
}

/// Map an HTTP status to success (2xx) or [`ApiError::Status`].
///
/// # Errors
///
/// Returns [`ApiError::Status`] for any status outside `200..300`.
pub fn check_status(status: u16) -> Result<(), ApiError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(ApiError::Status(status))
    }
}

/// Decode a JSON response body.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] if the body is not the expected payload.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Decode a `CSRFTOKEN` response body into a trimmed token.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] if the body is malformed or the token blank.
pub fn decode_csrf_token(body: &[u8]) -> Result<CsrfToken, ApiError> {
    let response: CsrfTokenResponse = decode(body)?;
    CsrfToken::parse(&response.csrf_token)
}

fn deserialize_max_age<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawMaxAge {
        Number(u64),
        Text(String),
    }

    match RawMaxAge::deserialize(deserializer)? {
        RawMaxAge::Number(n) => Ok(n),
        RawMaxAge::Text(s) => s.trim().parse::<u64>().map_err(serde::de::Error::custom),
    }
}
