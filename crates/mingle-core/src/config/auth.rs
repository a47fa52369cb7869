//! Token signing configuration.

use std::time::Duration;

use chrono::{TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Placeholder secret shipped in defaults. Never accepted at startup.
pub const PLACEHOLDER_SECRET: &str = "CHANGE_ME_IN_PRODUCTION";

/// Minimum HMAC-SHA256 key length in bytes.
pub const MIN_SECRET_BYTES: usize = 32;

/// Token signing and lifetime configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared secret for HS256 signing.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub jwt_access_ttl_minutes: u64,
    /// Refresh token TTL in hours.
    #[serde(default = "default_refresh_ttl")]
    pub jwt_refresh_ttl_hours: u64,
    /// Clock skew tolerated when checking `exp`, in seconds.
    #[serde(default = "default_leeway")]
    pub jwt_leeway_seconds: u64,
    /// Cookie the HTTP layer uses to carry the refresh token.
    #[serde(default)]
    pub refresh_cookie: RefreshCookieConfig,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"****")
            .field("jwt_access_ttl_minutes", &self.jwt_access_ttl_minutes)
            .field("jwt_refresh_ttl_hours", &self.jwt_refresh_ttl_hours)
            .field("jwt_leeway_seconds", &self.jwt_leeway_seconds)
            .field("refresh_cookie", &self.refresh_cookie)
            .finish()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_access_ttl_minutes: default_access_ttl(),
            jwt_refresh_ttl_hours: default_refresh_ttl(),
            jwt_leeway_seconds: default_leeway(),
            refresh_cookie: RefreshCookieConfig::default(),
        }
    }
}

impl AuthConfig {
    /// Access token lifetime. Saturates at `Duration::MAX` on overflow.
    pub fn access_ttl(&self) -> Duration {
        lifetime(self.jwt_access_ttl_minutes, 60).unwrap_or(Duration::MAX)
    }

    /// Refresh token lifetime. Saturates at `Duration::MAX` on overflow.
    pub fn refresh_ttl(&self) -> Duration {
        lifetime(self.jwt_refresh_ttl_hours, 3600).unwrap_or(Duration::MAX)
    }

    /// Rejects signing settings that must not reach a running process.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret == PLACEHOLDER_SECRET {
            return Err(AppError::configuration(
                "auth.jwt_secret is still the placeholder value",
            ));
        }
        if self.jwt_secret.len() < MIN_SECRET_BYTES {
            return Err(AppError::configuration(format!(
                "auth.jwt_secret must be at least {MIN_SECRET_BYTES} bytes for HS256, got {}",
                self.jwt_secret.len()
            )));
        }
        if self.jwt_access_ttl_minutes == 0 {
            return Err(AppError::configuration(
                "auth.jwt_access_ttl_minutes must be greater than zero",
            ));
        }
        for (field, value, unit_secs) in [
            ("auth.jwt_access_ttl_minutes", self.jwt_access_ttl_minutes, 60),
            ("auth.jwt_refresh_ttl_hours", self.jwt_refresh_ttl_hours, 3600),
        ] {
            if !expiry_representable(value, unit_secs) {
                return Err(AppError::configuration(format!(
                    "{field} = {value} yields an expiry beyond the supported date range"
                )));
            }
        }
        if self.access_ttl() >= self.refresh_ttl() {
            return Err(AppError::configuration(
                "access token lifetime must be shorter than refresh token lifetime",
            ));
        }
        Ok(())
    }
}

/// Attributes of the refresh-token cookie set by the HTTP layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshCookieConfig {
    /// Cookie name.
    #[serde(default = "default_cookie_name")]
    pub name: String,
    /// Cookie path scope.
    #[serde(default = "default_cookie_path")]
    pub path: String,
    /// Emit the `Secure` attribute (HTTPS deployments).
    #[serde(default)]
    pub secure: bool,
}

impl Default for RefreshCookieConfig {
    fn default() -> Self {
        Self {
            name: default_cookie_name(),
            path: default_cookie_path(),
            secure: false,
        }
    }
}

fn lifetime(value: u64, unit_secs: u64) -> Option<Duration> {
    value.checked_mul(unit_secs).map(Duration::from_secs)
}

/// Whether a token minted now with this lifetime gets a valid `exp`.
fn expiry_representable(value: u64, unit_secs: u64) -> bool {
    lifetime(value, unit_secs)
        .and_then(|ttl| TimeDelta::from_std(ttl).ok())
        .and_then(|delta| Utc::now().checked_add_signed(delta))
        .is_some()
}

fn default_jwt_secret() -> String {
    PLACEHOLDER_SECRET.to_string()
}

fn default_access_ttl() -> u64 {
    30
}

fn default_refresh_ttl() -> u64 {
    336
}

fn default_leeway() -> u64 {
    5
}

fn default_cookie_name() -> String {
    "rtk".to_string()
}

fn default_cookie_path() -> String {
    "/".to_string()
}
