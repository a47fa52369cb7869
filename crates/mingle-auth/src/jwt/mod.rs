//! JWT token encoding, decoding, and subject payloads.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod subject;

pub use claims::Claims;
pub use decoder::JwtDecoder;
pub use encoder::{JwtEncoder, TokenPair};
pub use subject::{Subject, TokenType};
