//! Member roles

use serde::{Deserialize, Serialize};

/// Member role for coarse-grained authorization.
///
/// Variant order defines authority: `Member < Manager < Admin`.
/// Authorization checks use this ordering and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Regular member.
    Member,
    /// Manager; may issue and manage invites.
    Manager,
    /// Administrator; may manage roles and account status.
    Admin,
}

impl Role {
    /// Check whether this role is manager or above
    pub const fn is_manager_or_above(&self) -> bool {
        matches!(self, Self::Manager | Self::Admin)
    }

    /// Check whether this role is admin
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "ADMIN"),
            Self::Manager => write!(f, "MANAGER"),
            Self::Member => write!(f, "MEMBER"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "MANAGER" => Ok(Self::Manager),
            "MEMBER" => Ok(Self::Member),
            _ => Err(RoleParseError(s.to_string())),
        }
    }
}

/// Error parsing a role string
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid role: {0}")]
pub struct RoleParseError(pub String);
