//! JWT claim set carried by access and refresh tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::subject::Subject;

/// Registered claims plus the subject, which travels as a JSON string in `sub`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject payload, JSON-encoded into the standard `sub` claim.
    #[serde(rename = "sub", with = "subject_json")]
    pub subject: Subject,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Unique token id; keeps two tokens minted in the same second distinct.
    /// Absent on tokens minted before ids were introduced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<Uuid>,
}

mod subject_json {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Subject;

    pub fn serialize<S: Serializer>(subject: &Subject, serializer: S) -> Result<S::Ok, S::Error> {
        let json = serde_json::to_string(subject).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&json)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Subject, D::Error> {
        let raw = String::deserialize(deserializer)?;
        serde_json::from_str(&raw).map_err(serde::de::Error::custom)
    }
}
