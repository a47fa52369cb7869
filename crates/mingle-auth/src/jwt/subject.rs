//! The typed payload signed into every session token.

use serde::{Deserialize, Serialize};

use mingle_core::types::Principal;

/// Distinguishes access tokens from refresh tokens.
///
/// Encoded as `"ATK"` / `"RTK"` on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TokenType {
    /// Short-lived token authorizing individual API calls.
    #[serde(rename = "ATK")]
    Access,
    /// Long-lived token exchanged for a new pair.
    #[serde(rename = "RTK")]
    Refresh,
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenType::Access => write!(f, "ACCESS"),
            TokenType::Refresh => write!(f, "REFRESH"),
        }
    }
}

/// Principal snapshot plus the token type discriminator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Employee identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// E-mail, the refresh registry key.
    pub email: String,
    /// Authority tag.
    pub authority: String,
    /// Which half of the pair this subject belongs to.
    #[serde(rename = "type")]
    pub token_type: TokenType,
}

impl Subject {
    /// Subject for an access token.
    pub fn access(principal: &Principal) -> Self {
        Self::of(principal, TokenType::Access)
    }

    /// Subject for a refresh token.
    pub fn refresh(principal: &Principal) -> Self {
        Self::of(principal, TokenType::Refresh)
    }

    fn of(principal: &Principal, token_type: TokenType) -> Self {
        Self {
            id: principal.id,
            name: principal.name.clone(),
            email: principal.email.clone(),
            authority: principal.authority.clone(),
            token_type,
        }
    }

    /// The principal snapshot embedded in this subject.
    pub fn principal(&self) -> Principal {
        Principal::new(self.id, &self.name, &self.email, &self.authority)
    }

    /// Whether this subject belongs to a refresh token.
    pub fn is_refresh(&self) -> bool {
        self.token_type == TokenType::Refresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_schema() {
        let principal = Principal::new(3, "Choi Yuna", "yuna@mingle.com", "ROLE_CONSULTANT");
        let json = serde_json::to_value(Subject::refresh(&principal)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 3,
                "name": "Choi Yuna",
                "email": "yuna@mingle.com",
                "authority": "ROLE_CONSULTANT",
                "type": "RTK",
            })
        );
    }

    #[test]
    fn test_unknown_type_rejected() {
        let raw = r#"{"id":1,"name":"n","email":"e","authority":"a","type":"XTK"}"#;
        assert!(serde_json::from_str::<Subject>(raw).is_err());
    }

    #[test]
    fn test_principal_roundtrip_drops_type() {
        let principal = Principal::new(9, "Han", "han@mingle.com", "ROLE_ADMIN");
        assert_eq!(Subject::access(&principal).principal(), principal);
        assert_eq!(Subject::refresh(&principal).principal(), principal);
    }
}
