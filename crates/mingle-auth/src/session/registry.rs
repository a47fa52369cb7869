//! Refresh-token registry: one current refresh token per e-mail.

use std::sync::Arc;
use std::time::Duration;

use mingle_cache::provider::CacheManager;
use mingle_core::result::AppResult;
use mingle_core::traits::CacheProvider;

/// Typed view over the cache used as the refresh-token registry.
///
/// Keys are principal e-mails verbatim; values are refresh token strings.
/// Writing always overwrites, so at most one entry exists per principal.
#[derive(Debug, Clone)]
pub struct RefreshRegistry {
    cache: Arc<CacheManager>,
}

impl RefreshRegistry {
    /// Creates a registry over the given cache.
    pub fn new(cache: Arc<CacheManager>) -> Self {
        Self { cache }
    }

    /// Records `token` as the current refresh token for `email`.
    pub async fn store(&self, email: &str, token: &str, ttl: Duration) -> AppResult<()> {
        self.cache.set(email, token, ttl).await
    }

    /// The current refresh token for `email`, if any.
    pub async fn current(&self, email: &str) -> AppResult<Option<String>> {
        self.cache.get(email).await
    }

    /// Consumes the entry for `email` if it is exactly `token`.
    ///
    /// Returns `false` when there is no entry or it holds another token.
    pub async fn take_if_current(&self, email: &str, token: &str) -> AppResult<bool> {
        self.cache.compare_and_delete(email, token).await
    }

    /// Removes whatever entry `email` has.
    pub async fn revoke(&self, email: &str) -> AppResult<()> {
        self.cache.delete(email).await
    }

    /// Time left before the entry for `email` expires.
    pub async fn remaining_ttl(&self, email: &str) -> AppResult<Option<Duration>> {
        self.cache.ttl(email).await
    }
}
