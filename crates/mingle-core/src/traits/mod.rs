//! Core traits defined in `mingle-core` and implemented by other crates.

pub mod cache;
pub mod principal;

pub use cache::CacheProvider;
pub use principal::PrincipalRepository;
