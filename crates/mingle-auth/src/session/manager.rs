//! Session token manager: sign-in issuance, refresh rotation, logout.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use mingle_cache::provider::CacheManager;
use mingle_core::config::AuthConfig;
use mingle_core::result::AppResult;
use mingle_core::traits::PrincipalRepository;

use crate::error::SessionError;
use crate::jwt::{JwtDecoder, JwtEncoder, Subject, TokenPair};

use super::registry::RefreshRegistry;

/// Registry state of a single principal.
#[derive(Debug, Clone, Serialize)]
pub struct RegistryStatus {
    /// The principal's e-mail.
    pub email: String,
    /// Whether a refresh token is currently registered.
    pub active: bool,
    /// Seconds until the registered refresh token lapses.
    pub ttl_seconds: Option<u64>,
}

/// Issues, verifies, rotates, and revokes session token pairs.
#[derive(Clone)]
pub struct SessionManager {
    /// JWT encoder for token generation.
    jwt_encoder: Arc<JwtEncoder>,
    /// JWT decoder for token validation.
    jwt_decoder: Arc<JwtDecoder>,
    /// Current refresh token per principal.
    registry: RefreshRegistry,
    /// Principal lookup used at sign-in.
    principals: Arc<dyn PrincipalRepository>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("jwt_encoder", &self.jwt_encoder)
            .field("principals", &self.principals)
            .finish()
    }
}

impl SessionManager {
    /// Creates a session manager from already-built components.
    pub fn new(
        jwt_encoder: Arc<JwtEncoder>,
        jwt_decoder: Arc<JwtDecoder>,
        registry: RefreshRegistry,
        principals: Arc<dyn PrincipalRepository>,
    ) -> Self {
        Self {
            jwt_encoder,
            jwt_decoder,
            registry,
            principals,
        }
    }

    /// Validates `config` and wires encoder, decoder, and registry.
    ///
    /// A weak or placeholder signing key is rejected here so the process
    /// fails at startup instead of per request.
    pub fn from_config(
        config: &AuthConfig,
        cache: Arc<CacheManager>,
        principals: Arc<dyn PrincipalRepository>,
    ) -> AppResult<Self> {
        config.validate()?;
        Ok(Self::new(
            Arc::new(JwtEncoder::new(config)),
            Arc::new(JwtDecoder::new(config)),
            RefreshRegistry::new(cache),
            principals,
        ))
    }

    /// Issues a fresh pair for the principal registered under `email`.
    ///
    /// Overwrites any refresh token previously registered for the principal.
    pub async fn issue(&self, email: &str) -> Result<TokenPair, SessionError> {
        let principal = self
            .principals
            .find_by_email(email)
            .await?
            .ok_or_else(|| SessionError::PrincipalNotFound {
                email: email.to_string(),
            })?;

        let tokens = self.jwt_encoder.generate_token_pair(&principal)?;
        self.registry
            .store(
                &principal.email,
                &tokens.refresh_token,
                self.jwt_encoder.refresh_ttl(),
            )
            .await?;

        info!(
            employee_id = principal.id,
            email = %principal.email,
            "Session tokens issued"
        );
        Ok(tokens)
    }

    /// Exchanges a registered refresh token for a new pair.
    ///
    /// The presented token is consumed atomically, so it can be renewed
    /// exactly once even under concurrent requests. The new pair is built
    /// from the embedded subject without a fresh principal lookup.
    pub async fn renew(&self, refresh_token: &str) -> Result<TokenPair, SessionError> {
        let claims = self.jwt_decoder.decode(refresh_token)?;
        let subject = claims.subject;

        if !subject.is_refresh() {
            warn!(email = %subject.email, "Renewal attempted with an access token");
            return Err(SessionError::StaleOrUnknownToken);
        }

        let consumed = self
            .registry
            .take_if_current(&subject.email, refresh_token)
            .await?;
        if !consumed {
            warn!(email = %subject.email, "Renewal with stale or unknown refresh token");
            return Err(SessionError::StaleOrUnknownToken);
        }

        let principal = subject.principal();
        let tokens = self.jwt_encoder.generate_token_pair(&principal)?;
        self.registry
            .store(
                &principal.email,
                &tokens.refresh_token,
                self.jwt_encoder.refresh_ttl(),
            )
            .await?;

        info!(
            employee_id = principal.id,
            email = %principal.email,
            "Session tokens renewed"
        );
        Ok(tokens)
    }

    /// Logs out: revokes the principal's refresh token.
    ///
    /// The access token itself stays valid until it expires.
    pub async fn invalidate(&self, access_token: &str) -> Result<(), SessionError> {
        let subject = self.verify(access_token)?;
        self.registry.revoke(&subject.email).await?;

        info!(email = %subject.email, "Refresh token revoked");
        Ok(())
    }

    /// Verifies a token and returns its subject.
    pub fn verify(&self, token: &str) -> Result<Subject, SessionError> {
        let claims = self.jwt_decoder.decode(token)?;
        debug!(
            email = %claims.subject.email,
            token_type = %claims.subject.token_type,
            "Token verified"
        );
        Ok(claims.subject)
    }

    /// Reports whether `email` currently has a renewable session.
    pub async fn registry_status(&self, email: &str) -> Result<RegistryStatus, SessionError> {
        let ttl = self.registry.remaining_ttl(email).await?;
        Ok(RegistryStatus {
            email: email.to_string(),
            active: ttl.is_some(),
            ttl_seconds: ttl.map(|d| d.as_secs()),
        })
    }

    /// The underlying refresh registry.
    pub fn registry(&self) -> &RefreshRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::{TimeDelta, Utc};

    use mingle_cache::memory::MemoryCacheProvider;
    use mingle_core::config::cache::MemoryCacheConfig;
    use mingle_core::error::ErrorKind;
    use mingle_core::types::Principal;
    use mingle_database::InMemoryPrincipalRepository;

    use super::*;
    use crate::jwt::TokenType;

    const EMAIL: &str = "a@x.com";

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "unit-test-secret-unit-test-secret-0001".to_string(),
            jwt_access_ttl_minutes: 30,
            jwt_refresh_ttl_hours: 336,
            ..AuthConfig::default()
        }
    }

    fn manager() -> SessionManager {
        let cache = Arc::new(CacheManager::from_provider(Arc::new(
            MemoryCacheProvider::new(&MemoryCacheConfig::default()),
        )));
        let principals = Arc::new(InMemoryPrincipalRepository::with_principals([
            Principal::new(1, "Kang Mirae", EMAIL, "ROLE_MANAGER"),
        ]));
        SessionManager::from_config(&config(), cache, principals).unwrap()
    }

    #[tokio::test]
    async fn test_issue_registers_refresh_token() {
        let manager = manager();
        let pair = manager.issue(EMAIL).await.unwrap();

        let stored = manager.registry().current(EMAIL).await.unwrap();
        assert_eq!(stored.as_deref(), Some(pair.refresh_token.as_str()));

        let ttl = manager.registry().remaining_ttl(EMAIL).await.unwrap().unwrap();
        let refresh = Duration::from_secs(336 * 3600);
        assert!(ttl <= refresh);
        assert!(ttl > refresh - Duration::from_secs(5));

        let access_span = pair.access_expires_at - Utc::now();
        assert!((access_span - TimeDelta::minutes(30)).num_seconds().abs() <= 2);
    }

    #[tokio::test]
    async fn test_issue_unknown_principal() {
        let err = manager().issue("ghost@x.com").await.unwrap_err();
        assert!(matches!(err, SessionError::PrincipalNotFound { ref email } if email == "ghost@x.com"));
    }

    #[tokio::test]
    async fn test_verify_discriminators() {
        let manager = manager();
        let pair = manager.issue(EMAIL).await.unwrap();

        let access = manager.verify(&pair.access_token).unwrap();
        let refresh = manager.verify(&pair.refresh_token).unwrap();
        assert_eq!(access.token_type, TokenType::Access);
        assert_eq!(refresh.token_type, TokenType::Refresh);
        assert_eq!(access.principal(), refresh.principal());
    }

    #[tokio::test]
    async fn test_renew_rotates_and_is_single_use() {
        let manager = manager();
        let first = manager.issue(EMAIL).await.unwrap();

        let second = manager.renew(&first.refresh_token).await.unwrap();
        assert_ne!(second.refresh_token, first.refresh_token);
        assert_eq!(
            manager.registry().current(EMAIL).await.unwrap().as_deref(),
            Some(second.refresh_token.as_str())
        );

        let replay = manager.renew(&first.refresh_token).await.unwrap_err();
        assert!(matches!(replay, SessionError::StaleOrUnknownToken));

        // the replay attempt must not have disturbed the live session
        assert!(manager.renew(&second.refresh_token).await.is_ok());
    }

    #[tokio::test]
    async fn test_renew_rejects_access_token_without_consuming() {
        let manager = manager();
        let pair = manager.issue(EMAIL).await.unwrap();

        let err = manager.renew(&pair.access_token).await.unwrap_err();
        assert!(matches!(err, SessionError::StaleOrUnknownToken));
        assert!(manager.renew(&pair.refresh_token).await.is_ok());
    }

    #[tokio::test]
    async fn test_renew_after_reissue_rejects_older_token() {
        let manager = manager();
        let older = manager.issue(EMAIL).await.unwrap();
        let newer = manager.issue(EMAIL).await.unwrap();

        assert!(matches!(
            manager.renew(&older.refresh_token).await,
            Err(SessionError::StaleOrUnknownToken)
        ));
        assert!(manager.renew(&newer.refresh_token).await.is_ok());
    }

    #[tokio::test]
    async fn test_invalidate_then_renew() {
        let manager = manager();
        let pair = manager.issue(EMAIL).await.unwrap();

        manager.invalidate(&pair.access_token).await.unwrap();
        assert!(manager.registry().current(EMAIL).await.unwrap().is_none());

        let err = manager.renew(&pair.refresh_token).await.unwrap_err();
        assert!(matches!(err, SessionError::StaleOrUnknownToken));

        // access token stays cryptographically valid until expiry
        assert!(manager.verify(&pair.access_token).is_ok());
    }

    #[tokio::test]
    async fn test_invalid_tokens() {
        let manager = manager();
        assert!(matches!(
            manager.verify("garbage"),
            Err(SessionError::InvalidToken { .. })
        ));
        assert!(matches!(
            manager.renew("garbage").await,
            Err(SessionError::InvalidToken { .. })
        ));
        assert!(matches!(
            manager.invalidate("garbage").await,
            Err(SessionError::InvalidToken { .. })
        ));
    }

    #[tokio::test]
    async fn test_concurrent_renewals_single_winner() {
        let manager = manager();
        let pair = manager.issue(EMAIL).await.unwrap();

        let (a, b) = tokio::join!(
            manager.renew(&pair.refresh_token),
            manager.renew(&pair.refresh_token)
        );
        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
    }

    #[tokio::test]
    async fn test_registry_status() {
        let manager = manager();
        let before = manager.registry_status(EMAIL).await.unwrap();
        assert!(!before.active);
        assert_eq!(before.ttl_seconds, None);

        manager.issue(EMAIL).await.unwrap();
        let after = manager.registry_status(EMAIL).await.unwrap();
        assert!(after.active);
        assert!(after.ttl_seconds.unwrap() > 0);
    }

    #[test]
    fn test_weak_secret_fails_construction() {
        let cache = Arc::new(CacheManager::from_provider(Arc::new(
            MemoryCacheProvider::new(&MemoryCacheConfig::default()),
        )));
        let weak = AuthConfig {
            jwt_secret: "short".to_string(),
            ..config()
        };
        let err = SessionManager::from_config(
            &weak,
            cache,
            Arc::new(InMemoryPrincipalRepository::new()),
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
