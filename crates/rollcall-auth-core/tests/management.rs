//! Role change and activation management tests

mod common;

use common::{auth_service, seed_active};
use rollcall_auth_core::AuthError;
use rollcall_types::{MemberId, Role};

#[tokio::test]
async fn update_role_changes_issued_tokens() {
    let (repo, service) = auth_service();
    let admin = seed_active(&repo, "admin@x.com", "longenough1", Role::Admin);
    let member = seed_active(&repo, "alice@x.com", "longenough1", Role::Member);

    let updated = service
        .update_role(
            MemberId::from(admin.id),
            MemberId::from(member.id),
            Role::Manager,
        )
        .await
        .unwrap();
    assert_eq!(updated.parsed_role(), Role::Manager);

    // Next login carries the new role
    let session = service.login("alice@x.com", "longenough1").await.unwrap();
    let identity = service
        .tokens()
        .verify_access(&session.tokens.access_token)
        .unwrap();
    assert_eq!(identity.role, Role::Manager);
}

#[tokio::test]
async fn self_actions_are_forbidden() {
    let (repo, service) = auth_service();
    let admin = seed_active(&repo, "admin@x.com", "longenough1", Role::Admin);
    let admin_id = MemberId::from(admin.id);

    let role_change = service.update_role(admin_id, admin_id, Role::Member).await;
    assert!(matches!(role_change, Err(AuthError::SelfActionForbidden)));

    let deactivation = service.deactivate(admin_id, admin_id).await;
    assert!(matches!(deactivation, Err(AuthError::SelfActionForbidden)));
}

#[tokio::test]
async fn update_role_missing_target_is_not_found() {
    let (repo, service) = auth_service();
    let admin = seed_active(&repo, "admin@x.com", "longenough1", Role::Admin);

    let result = service
        .update_role(MemberId::from(admin.id), MemberId::new(), Role::Manager)
        .await;
    assert!(matches!(result, Err(AuthError::NotFound)));
}

#[tokio::test]
async fn deactivate_and_reactivate_roundtrip() {
    let (repo, service) = auth_service();
    let admin = seed_active(&repo, "admin@x.com", "longenough1", Role::Admin);
    let member = seed_active(&repo, "alice@x.com", "longenough1", Role::Member);
    let member_id = MemberId::from(member.id);

    service
        .deactivate(MemberId::from(admin.id), member_id)
        .await
        .unwrap();
    assert!(!repo.get(member.id).unwrap().is_active);

    // Deactivating twice is a bad request
    let again = service.deactivate(MemberId::from(admin.id), member_id).await;
    assert!(matches!(again, Err(AuthError::Validation(_))));

    service.reactivate(member_id).await.unwrap();
    assert!(repo.get(member.id).unwrap().is_active);
    assert!(service.login("alice@x.com", "longenough1").await.is_ok());

    // Reactivating an active member is a bad request
    let again = service.reactivate(member_id).await;
    assert!(matches!(again, Err(AuthError::Validation(_))));
}
