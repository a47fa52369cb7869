//! # mingle-entity
//!
//! Row models read by the persistence layer.

pub mod employee;

pub use employee::Employee;
