//! JWT token creation with configurable signing and TTL.

use std::time::Duration;

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mingle_core::config::AuthConfig;
use mingle_core::types::Principal;

use super::claims::Claims;
use super::subject::Subject;
use crate::error::SessionError;

/// Creates signed access and refresh tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Access token lifetime.
    access_ttl: Duration,
    /// Refresh token lifetime.
    refresh_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

/// Result of a successful token pair generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl: config.access_ttl(),
            refresh_ttl: config.refresh_ttl(),
        }
    }

    /// Refresh token lifetime, also the registry TTL.
    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Generates a new access + refresh token pair from one principal snapshot.
    ///
    /// Both tokens share the same issue instant.
    pub fn generate_token_pair(&self, principal: &Principal) -> Result<TokenPair, SessionError> {
        let now = Utc::now().trunc_subsecs(0);

        let (access_token, access_expires_at) =
            self.sign(Subject::access(principal), now, self.access_ttl)?;
        let (refresh_token, refresh_expires_at) =
            self.sign(Subject::refresh(principal), now, self.refresh_ttl)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
        })
    }

    /// Signs a single subject, returning the token and its expiration.
    pub fn sign(
        &self,
        subject: Subject,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<(String, DateTime<Utc>), SessionError> {
        let lifetime = TimeDelta::from_std(ttl)
            .map_err(|e| SessionError::Signing(format!("Token lifetime out of range: {e}")))?;
        let expires_at = issued_at
            .checked_add_signed(lifetime)
            .ok_or_else(|| SessionError::Signing("Token expiry out of range".to_string()))?;

        let token_type = subject.token_type;
        let claims = Claims {
            subject,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Some(Uuid::new_v4()),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| SessionError::Signing(format!("Failed to encode {token_type} token: {e}")))?;

        Ok((token, expires_at))
    }
}
