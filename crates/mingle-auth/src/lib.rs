//! # mingle-auth
//!
//! Session token management for MingleCRM employees.
//!
//! ## Modules
//!
//! - `jwt`: signed subject payloads, token encoding and verification
//! - `session`: issue / renew / invalidate flows over the refresh registry,
//!   plus the bearer and cookie helpers used by HTTP callers
//! - `error`: the session error taxonomy

pub mod error;
pub mod jwt;
pub mod session;

pub use error::SessionError;
pub use jwt::{Claims, JwtDecoder, JwtEncoder, Subject, TokenPair, TokenType};
pub use session::{RefreshCookie, RefreshRegistry, SessionManager};
