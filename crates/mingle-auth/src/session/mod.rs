//! Session token lifecycle: issue, renew, invalidate, verify.

pub mod cookie;
pub mod manager;
pub mod registry;

pub use cookie::{AccessTokenResponse, RefreshCookie, bearer_token};
pub use manager::{RegistryStatus, SessionManager};
pub use registry::RefreshRegistry;
