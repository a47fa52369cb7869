//! Principal lookup trait implemented by the persistence layer.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::Principal;

/// Resolves authenticated actors by their unique e-mail address.
#[async_trait]
pub trait PrincipalRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Find a principal by e-mail. `Ok(None)` means no such principal.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Principal>>;
}
