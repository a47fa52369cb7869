//! Principal repository implementations.

pub mod employee;
pub mod memory;

pub use employee::EmployeeRepository;
pub use memory::InMemoryPrincipalRepository;
