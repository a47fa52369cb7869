//! JWT token verification.

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use mingle_core::config::AuthConfig;

use super::claims::Claims;
use crate::error::SessionError;

/// Verifies token signatures and expiry.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    ///
    /// Tokens are signed with HS256, but HS384 and HS512 are also accepted:
    /// legacy issuers chose the HMAC variant from the key length.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.validate_exp = true;
        validation.leeway = config.jwt_leeway_seconds;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a token of either type.
    ///
    /// Malformed tokens, bad signatures, and expiry all map to
    /// [`SessionError::InvalidToken`]; only the reason text differs.
    pub fn decode(&self, token: &str) -> Result<Claims, SessionError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    JwtErrorKind::ExpiredSignature => {
                        SessionError::invalid_token("Token has expired")
                    }
                    JwtErrorKind::InvalidToken => {
                        SessionError::invalid_token("Invalid token format")
                    }
                    JwtErrorKind::InvalidSignature => {
                        SessionError::invalid_token("Invalid token signature")
                    }
                    _ => SessionError::invalid_token(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}
