//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.

use chrono::{DateTime, Utc};
use rollcall_types::{MemberId, Role};
use sqlx::FromRow;
use uuid::Uuid;

/// Member row from the database
#[derive(Debug, Clone, FromRow)]
pub struct MemberRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    /// Absent until registration or invite acceptance completes
    pub password_hash: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MemberRow {
    /// Get the member ID as a typed identifier
    pub fn member_id(&self) -> MemberId {
        MemberId::from(self.id)
    }

    /// Parse the stored role, defaulting to the least-privileged one
    pub fn parsed_role(&self) -> Role {
        self.role.parse().unwrap_or(Role::Member)
    }
}
