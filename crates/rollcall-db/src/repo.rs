//! Repository traits
//!
//! Define async repository interfaces for credential store operations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::MemberRow;

/// Member repository trait
///
/// The auth core is generic over this interface; production code uses the
/// Postgres implementation, tests an in-memory one. Callers pass emails
/// already normalized (lowercased and trimmed).
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find a member by ID
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<MemberRow>>;

    /// Find a member by normalized email
    async fn find_by_email(&self, email: &str) -> DbResult<Option<MemberRow>>;

    /// Create a new member; fails with `DbError::Duplicate` if the email is taken
    async fn create(&self, member: CreateMember) -> DbResult<MemberRow>;

    /// Update a member's password hash
    async fn update_password_hash(&self, id: Uuid, hash: &str) -> DbResult<()>;

    /// Update a member's active flag
    async fn update_active(&self, id: Uuid, active: bool) -> DbResult<()>;

    /// Update a member's role
    async fn update_role(&self, id: Uuid, role: &str) -> DbResult<()>;

    /// Update a member's email verified flag
    async fn update_email_verified(&self, id: Uuid, verified: bool) -> DbResult<()>;
}

/// Create member input
#[derive(Debug, Clone)]
pub struct CreateMember {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    /// `None` for invited members who have not yet set a password
    pub password_hash: Option<String>,
    pub role: String,
}
