//! Shared test helpers

pub mod mock_repos;

use std::sync::Arc;

use rollcall_auth_core::{AuthConfig, AuthService};
use rollcall_db::MemberRow;
use rollcall_types::Role;
use uuid::Uuid;

use mock_repos::MockMemberRepository;

pub const TEST_SECRET: &str = "rollcall-test-secret-at-least-32-bytes!";

/// Low bcrypt cost keeps seeded fixtures fast; production uses the default
pub const TEST_BCRYPT_COST: u32 = 4;

/// Build an auth service over a fresh in-memory repository
pub fn auth_service() -> (Arc<MockMemberRepository>, AuthService<MockMemberRepository>) {
    let repo = Arc::new(MockMemberRepository::new());
    let service = AuthService::new(
        AuthConfig::new(TEST_SECRET).unwrap(),
        Arc::clone(&repo),
    );
    (repo, service)
}

/// Seed an active member with a hashed password
pub fn seed_active(repo: &MockMemberRepository, email: &str, password: &str, role: Role) -> MemberRow {
    let row = MemberRow {
        id: Uuid::new_v4(),
        email: email.to_string(),
        name: "Test Member".to_string(),
        password_hash: Some(bcrypt::hash(password, TEST_BCRYPT_COST).unwrap()),
        role: role.to_string(),
        is_active: true,
        email_verified: true,
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
    };
    repo.insert_member(row.clone());
    row
}

/// Seed an invited member (no password yet)
pub fn seed_invited(repo: &MockMemberRepository, email: &str, role: Role) -> MemberRow {
    let row = MemberRow {
        id: Uuid::new_v4(),
        email: email.to_string(),
        name: "Invited Member".to_string(),
        password_hash: None,
        role: role.to_string(),
        is_active: true,
        email_verified: false,
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
    };
    repo.insert_member(row.clone());
    row
}
