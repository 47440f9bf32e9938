//! PostgreSQL member repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::models::MemberRow;
use crate::repo::{CreateMember, MemberRepository};

/// PostgreSQL member repository
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    /// Create a new member repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<MemberRow>> {
        let member = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT id, email, name, password_hash, role, is_active,
                   email_verified, created_at, updated_at
            FROM members
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<MemberRow>> {
        let member = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT id, email, name, password_hash, role, is_active,
                   email_verified, created_at, updated_at
            FROM members
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    async fn create(&self, member: CreateMember) -> DbResult<MemberRow> {
        let row = sqlx::query_as::<_, MemberRow>(
            r#"
            INSERT INTO members (id, email, name, password_hash, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, email, name, password_hash, role, is_active,
                      email_verified, created_at, updated_at
            "#,
        )
        .bind(member.id)
        .bind(&member.email)
        .bind(&member.name)
        .bind(&member.password_hash)
        .bind(&member.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => DbError::Duplicate,
            _ => DbError::Sqlx(e),
        })?;

        Ok(row)
    }

    async fn update_password_hash(&self, id: Uuid, hash: &str) -> DbResult<()> {
        sqlx::query("UPDATE members SET password_hash = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(hash)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update_active(&self, id: Uuid, active: bool) -> DbResult<()> {
        sqlx::query("UPDATE members SET is_active = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(active)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update_role(&self, id: Uuid, role: &str) -> DbResult<()> {
        sqlx::query("UPDATE members SET role = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(role)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update_email_verified(&self, id: Uuid, verified: bool) -> DbResult<()> {
        sqlx::query("UPDATE members SET email_verified = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(verified)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
