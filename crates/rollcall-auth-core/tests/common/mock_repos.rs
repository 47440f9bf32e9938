//! In-memory member repository for testing

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use rollcall_db::{CreateMember, DbError, DbResult, MemberRepository, MemberRow};
use std::sync::Arc;
use uuid::Uuid;

/// In-memory member repository backed by dashmap
#[derive(Default, Clone)]
pub struct MockMemberRepository {
    members: Arc<DashMap<Uuid, MemberRow>>,
    by_email: Arc<DashMap<String, Uuid>>,
}

impl MockMemberRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a member row directly
    pub fn insert_member(&self, member: MemberRow) {
        self.by_email.insert(member.email.clone(), member.id);
        self.members.insert(member.id, member);
    }

    /// Fetch a member row directly
    pub fn get(&self, id: Uuid) -> Option<MemberRow> {
        self.members.get(&id).map(|r| r.value().clone())
    }
}

#[async_trait]
impl MemberRepository for MockMemberRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<MemberRow>> {
        Ok(self.members.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<MemberRow>> {
        Ok(self
            .by_email
            .get(email)
            .and_then(|id| self.members.get(id.value()).map(|r| r.value().clone())))
    }

    async fn create(&self, member: CreateMember) -> DbResult<MemberRow> {
        if self.by_email.contains_key(&member.email) {
            return Err(DbError::Duplicate);
        }
        let row = MemberRow {
            id: member.id,
            email: member.email,
            name: member.name,
            password_hash: member.password_hash,
            role: member.role,
            is_active: true,
            email_verified: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.insert_member(row.clone());
        Ok(row)
    }

    async fn update_password_hash(&self, id: Uuid, hash: &str) -> DbResult<()> {
        if let Some(mut member) = self.members.get_mut(&id) {
            member.password_hash = Some(hash.to_string());
            member.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn update_active(&self, id: Uuid, active: bool) -> DbResult<()> {
        if let Some(mut member) = self.members.get_mut(&id) {
            member.is_active = active;
            member.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn update_role(&self, id: Uuid, role: &str) -> DbResult<()> {
        if let Some(mut member) = self.members.get_mut(&id) {
            member.role = role.to_string();
            member.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn update_email_verified(&self, id: Uuid, verified: bool) -> DbResult<()> {
        if let Some(mut member) = self.members.get_mut(&id) {
            member.email_verified = verified;
            member.updated_at = Utc::now();
        }
        Ok(())
    }
}
