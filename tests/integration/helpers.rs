//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use mingle_auth::SessionManager;
use mingle_cache::CacheManager;
use mingle_core::config::AppConfig;
use mingle_database::InMemoryPrincipalRepository;
use mingle_entity::Employee;

/// Test application context
pub struct TestApp {
    /// Session manager under test
    pub manager: SessionManager,
    /// Principal directory the manager resolves e-mails against
    pub principals: Arc<InMemoryPrincipalRepository>,
    /// Cache backing the refresh registry
    pub cache: Arc<CacheManager>,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application from the fixture config.
    pub async fn new() -> Self {
        let config = AppConfig::load_validated("tests/fixtures/test_config.toml")
            .expect("Failed to load test config");

        let cache = Arc::new(
            CacheManager::new(&config.cache)
                .await
                .expect("Failed to init cache"),
        );
        let principals = Arc::new(InMemoryPrincipalRepository::new());

        let manager = SessionManager::from_config(
            &config.auth,
            Arc::clone(&cache),
            principals.clone(),
        )
        .expect("Failed to build session manager");

        Self {
            manager,
            principals,
            cache,
            config,
        }
    }

    /// Register an employee the manager can issue tokens for.
    pub fn create_employee(&self, id: i64, name: &str, email: &str, authority: &str) {
        let employee = Employee {
            id,
            name: name.to_string(),
            email: email.to_string(),
            authority: authority.to_string(),
        };
        self.principals.insert(employee.to_principal());
    }
}
