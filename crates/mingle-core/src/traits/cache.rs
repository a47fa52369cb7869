//! Cache provider trait for pluggable key-value backends.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for key-value backends (Redis or in-memory).
///
/// Values are plain strings. Each individual call is atomic with respect
/// to its key; the provider is responsible for key prefixing and TTL
/// enforcement.
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key does not exist or has expired.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value with a TTL, replacing any previous value.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// Delete a key. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Atomically delete `key` only if it currently holds `expected`.
    ///
    /// Returns `true` if the entry matched and was removed.
    async fn compare_and_delete(&self, key: &str, expected: &str) -> AppResult<bool>;

    /// Remaining time-to-live of a key, or `None` if it does not exist.
    async fn ttl(&self, key: &str) -> AppResult<Option<Duration>>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
