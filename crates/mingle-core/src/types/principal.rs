//! Snapshot of an authenticated actor.

use serde::{Deserialize, Serialize};

/// An authenticated employee as seen at token-issue time.
///
/// Tokens carry a copy of these fields; later changes to the stored
/// employee are not reflected in already-issued tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Employee identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Unique e-mail, also the refresh registry key.
    pub email: String,
    /// Authority tag such as `ROLE_MANAGER`.
    pub authority: String,
}

impl Principal {
    /// Creates a new principal snapshot.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        email: impl Into<String>,
        authority: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            authority: authority.into(),
        }
    }
}
