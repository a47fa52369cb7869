//! Helpers for the HTTP layer: bearer extraction and the refresh cookie.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mingle_core::config::RefreshCookieConfig;

use crate::error::SessionError;
use crate::jwt::TokenPair;

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header_value: &str) -> Result<&str, SessionError> {
    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or_else(|| SessionError::invalid_token("Missing Bearer scheme"))?
        .trim();

    if token.is_empty() {
        return Err(SessionError::invalid_token("Empty bearer token"));
    }
    Ok(token)
}

/// HTTP-only, path-scoped cookie carrying the refresh token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshCookie {
    /// Cookie name.
    pub name: String,
    /// The refresh token.
    pub value: String,
    /// Path scope.
    pub path: String,
    /// Whether to emit `Secure`.
    pub secure: bool,
    /// Seconds until the refresh token expires, never negative.
    pub max_age_seconds: i64,
}

impl RefreshCookie {
    /// Builds the cookie for `pair`, with `Max-Age` measured from `now`.
    pub fn from_pair(pair: &TokenPair, config: &RefreshCookieConfig, now: DateTime<Utc>) -> Self {
        let max_age_seconds = (pair.refresh_expires_at - now).num_seconds().max(0);
        Self {
            name: config.name.clone(),
            value: pair.refresh_token.clone(),
            path: config.path.clone(),
            secure: config.secure,
            max_age_seconds,
        }
    }
}

impl fmt::Display for RefreshCookie {
    /// Renders a `Set-Cookie` header value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}; Max-Age={}; Path={}; HttpOnly",
            self.name, self.value, self.max_age_seconds, self.path
        )?;
        if self.secure {
            write!(f, "; Secure")?;
        }
        Ok(())
    }
}

/// Response body returned to the client when the refresh token goes into a cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    /// The access token.
    pub atk: String,
    /// When the access token expires, as epoch milliseconds on the wire.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub atk_expiration: DateTime<Utc>,
}

impl From<&TokenPair> for AccessTokenResponse {
    fn from(pair: &TokenPair) -> Self {
        Self {
            atk: pair.access_token.clone(),
            atk_expiration: pair.access_expires_at,
        }
    }
}
