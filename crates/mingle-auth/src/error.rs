//! Errors raised by the session token flows.

use thiserror::Error;

use mingle_core::error::{AppError, ErrorKind};

/// Failure of an issue, renew, invalidate, or verify call.
///
/// None of these are retried; callers surface them immediately.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No principal is registered under the e-mail given to `issue`.
    #[error("No employee registered with e-mail '{email}'")]
    PrincipalNotFound {
        /// The e-mail that failed to resolve.
        email: String,
    },

    /// The token is malformed, badly signed, or expired.
    #[error("Invalid token: {reason}")]
    InvalidToken {
        /// Why verification failed.
        reason: String,
    },

    /// The refresh token is not the registry's current one, or is not a refresh token.
    #[error("Refresh token is stale or unknown")]
    StaleOrUnknownToken,

    /// Token construction failed.
    #[error("Failed to sign token: {0}")]
    Signing(String),

    /// The registry or principal directory failed.
    #[error(transparent)]
    Backend(#[from] AppError),
}

impl SessionError {
    /// Shorthand for [`SessionError::InvalidToken`].
    pub fn invalid_token(reason: impl Into<String>) -> Self {
        Self::InvalidToken {
            reason: reason.into(),
        }
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::PrincipalNotFound { .. } => {
                AppError::new(ErrorKind::NotFound, err.to_string())
            }
            SessionError::InvalidToken { .. } | SessionError::StaleOrUnknownToken => {
                AppError::new(ErrorKind::Authentication, err.to_string())
            }
            SessionError::Signing(message) => {
                AppError::internal(format!("Failed to sign token: {message}"))
            }
            SessionError::Backend(inner) => inner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_not_found_is_client_error() {
        let app: AppError = SessionError::PrincipalNotFound {
            email: "a@x.com".to_string(),
        }
        .into();
        assert_eq!(app.kind, ErrorKind::NotFound);
        assert!(app.message.contains("a@x.com"));
    }

    #[test]
    fn test_token_errors_are_unauthorized() {
        let stale: AppError = SessionError::StaleOrUnknownToken.into();
        let invalid: AppError = SessionError::invalid_token("Token has expired").into();
        assert_eq!(stale.kind.http_status(), 401);
        assert_eq!(invalid.kind.http_status(), 401);
    }

    #[test]
    fn test_backend_error_passes_through() {
        let app: AppError = SessionError::Backend(AppError::new(ErrorKind::Cache, "Redis error")).into();
        assert_eq!(app.kind, ErrorKind::Cache);
    }
}
