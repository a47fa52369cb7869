//! Employee repository backed by PostgreSQL.

use async_trait::async_trait;
use sqlx::PgPool;

use mingle_core::error::{AppError, ErrorKind};
use mingle_core::result::AppResult;
use mingle_core::traits::PrincipalRepository;
use mingle_core::types::Principal;
use mingle_entity::Employee;

/// Repository for employee lookups.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    /// Create a new employee repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an employee by exact e-mail.
    pub async fn find_employee_by_email(&self, email: &str) -> AppResult<Option<Employee>> {
        sqlx::query_as::<_, Employee>(
            "SELECT id, name, email, authority FROM employee WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find employee by email", e)
        })
    }
}

#[async_trait]
impl PrincipalRepository for EmployeeRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Principal>> {
        Ok(self
            .find_employee_by_email(email)
            .await?
            .map(Principal::from))
    }
}
