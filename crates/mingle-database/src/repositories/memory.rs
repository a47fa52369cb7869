//! In-process principal directory for tests and local development.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use mingle_core::result::AppResult;
use mingle_core::traits::PrincipalRepository;
use mingle_core::types::Principal;

/// Principal directory keyed by e-mail, held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPrincipalRepository {
    principals: Arc<DashMap<String, Principal>>,
}

impl InMemoryPrincipalRepository {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory pre-populated with `principals`.
    pub fn with_principals(principals: impl IntoIterator<Item = Principal>) -> Self {
        let repo = Self::new();
        for principal in principals {
            repo.insert(principal);
        }
        repo
    }

    /// Insert or replace a principal.
    pub fn insert(&self, principal: Principal) {
        self.principals.insert(principal.email.clone(), principal);
    }

    /// Remove a principal by e-mail, returning it if present.
    pub fn remove(&self, email: &str) -> Option<Principal> {
        self.principals.remove(email).map(|(_, p)| p)
    }
}

#[async_trait]
impl PrincipalRepository for InMemoryPrincipalRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Principal>> {
        Ok(self.principals.get(email).map(|entry| entry.value().clone()))
    }
}
