//! Member identity types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique member identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberId(pub Uuid);

impl MemberId {
    /// Create a new random member ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a member ID from a string
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for MemberId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for MemberId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Normalize an email for storage and lookup.
///
/// Emails are unique case-insensitively; every lookup and insert goes
/// through this so there is exactly one record per normalized address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_id_roundtrip() {
        let id = MemberId::new();
        let parsed = MemberId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_member_id_parse_invalid() {
        assert!(MemberId::parse("not-a-uuid").is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Alice@X.Com "), "alice@x.com");
        assert_eq!(normalize_email("bob@x.com"), "bob@x.com");
    }
}
