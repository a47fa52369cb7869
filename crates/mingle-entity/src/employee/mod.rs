//! Employee domain entity.

pub mod model;

pub use model::Employee;
