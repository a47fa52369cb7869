//! # mingle-core
//!
//! Core crate for the MingleCRM session service. Contains configuration
//! schemas, the principal snapshot type, the traits implemented by the
//! cache and database crates, and the unified error system.
//!
//! This crate has **no** internal dependencies on other MingleCRM crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
