//! # mingle-database
//!
//! PostgreSQL connection management and the principal repositories the
//! session service resolves employees through.

pub mod connection;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{EmployeeRepository, InMemoryPrincipalRepository};
