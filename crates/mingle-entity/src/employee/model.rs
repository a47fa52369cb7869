//! Employee entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use mingle_core::types::Principal;

/// A CRM employee account as stored in the `employee` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Employee {
    /// Unique employee identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Unique login e-mail.
    pub email: String,
    /// Authority tag, e.g. `ROLE_MANAGER`.
    pub authority: String,
}

impl Employee {
    /// Immutable snapshot used when signing tokens.
    pub fn to_principal(&self) -> Principal {
        Principal::new(self.id, &self.name, &self.email, &self.authority)
    }
}

impl From<Employee> for Principal {
    fn from(employee: Employee) -> Self {
        Principal {
            id: employee.id,
            name: employee.name,
            email: employee.email,
            authority: employee.authority,
        }
    }
}
