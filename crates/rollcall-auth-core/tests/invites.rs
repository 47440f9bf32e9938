//! Invite issuance, acceptance, validation, resend, and revocation tests

mod common;

use common::{auth_service, seed_active, seed_invited};
use rollcall_auth_core::{AuthError, InviteCheck, TokenKind};
use rollcall_types::{MemberId, Role};

#[tokio::test]
async fn invite_then_accept_issues_working_tokens() {
    // Scenario A: invite alice, accept, decode her access token
    let (repo, service) = auth_service();

    let invite = service.invite("alice@x.com", "Alice", Role::Member).await.unwrap();
    assert!(!invite.resent);
    assert!(invite.member.password_hash.is_none());

    let session = service
        .accept_invite(&invite.token, "longenough1")
        .await
        .unwrap();

    let identity = service
        .tokens()
        .verify_access(&session.tokens.access_token)
        .unwrap();
    assert_eq!(identity.member_id.0, invite.member.id);
    assert_eq!(identity.role, Role::Member);

    let stored = repo.get(invite.member.id).unwrap();
    assert!(stored.password_hash.is_some());
    assert!(stored.email_verified);
    assert!(stored.is_active);
}

#[tokio::test]
async fn invite_existing_pending_email_resends() {
    let (_repo, service) = auth_service();

    let first = service.invite("alice@x.com", "Alice", Role::Member).await.unwrap();
    let second = service.invite("alice@x.com", "Alice", Role::Member).await.unwrap();

    assert!(second.resent);
    assert_eq!(first.member.id, second.member.id);

    // The re-issued token still accepts
    assert!(service
        .accept_invite(&second.token, "longenough1")
        .await
        .is_ok());
}

#[tokio::test]
async fn invite_existing_active_email_conflicts() {
    let (repo, service) = auth_service();
    seed_active(&repo, "alice@x.com", "longenough1", Role::Member);

    let result = service.invite("alice@x.com", "Alice", Role::Member).await;
    assert!(matches!(result, Err(AuthError::DuplicateEmail)));
}

#[tokio::test]
async fn accept_invite_twice_fails_with_already_accepted() {
    let (_repo, service) = auth_service();

    let invite = service.invite("alice@x.com", "Alice", Role::Member).await.unwrap();

    service
        .accept_invite(&invite.token, "longenough1")
        .await
        .unwrap();

    // Token is still cryptographically valid but semantically stale
    let again = service.accept_invite(&invite.token, "other-pw-123").await;
    assert!(matches!(again, Err(AuthError::AlreadyAccepted)));
}

#[tokio::test]
async fn accept_invite_rejects_wrong_token_kind() {
    let (repo, service) = auth_service();
    let bob = seed_active(&repo, "bob@x.com", "longenough1", Role::Member);

    // A reset token is not an invite token
    let reset = service.tokens().sign_reset(MemberId::from(bob.id)).unwrap();
    let result = service.accept_invite(&reset, "longenough1").await;
    assert!(matches!(result, Err(AuthError::TokenKindMismatch)));
}

#[tokio::test]
async fn accept_invite_for_unknown_member_is_not_found() {
    let (_repo, service) = auth_service();

    // Valid invite token whose subject was never stored
    let token = service.tokens().sign_invite(MemberId::new()).unwrap();
    let result = service.accept_invite(&token, "longenough1").await;
    assert!(matches!(result, Err(AuthError::NotFound)));
}

#[tokio::test]
async fn validate_invite_reports_without_mutating() {
    let (repo, service) = auth_service();

    let invite = service.invite("alice@x.com", "Alice", Role::Member).await.unwrap();

    // Valid, repeatedly
    for _ in 0..2 {
        let check = service.validate_invite(&invite.token).await.unwrap();
        assert_eq!(
            check,
            InviteCheck::Valid {
                email: "alice@x.com".to_string(),
                name: "Alice".to_string(),
            }
        );
    }
    assert!(repo.get(invite.member.id).unwrap().password_hash.is_none());

    // Already accepted
    service
        .accept_invite(&invite.token, "longenough1")
        .await
        .unwrap();
    let check = service.validate_invite(&invite.token).await.unwrap();
    assert_eq!(check, InviteCheck::AlreadyAccepted);

    // Deactivated
    let other = service.invite("carol@x.com", "Carol", Role::Member).await.unwrap();
    service
        .revoke_invite(MemberId::from(other.member.id))
        .await
        .unwrap();
    let check = service.validate_invite(&other.token).await.unwrap();
    assert_eq!(check, InviteCheck::Deactivated);
}

#[tokio::test]
async fn resend_mints_a_fresh_invite_token() {
    let (repo, service) = auth_service();
    let invited = seed_invited(&repo, "alice@x.com", Role::Manager);

    let outcome = service
        .resend_invite(MemberId::from(invited.id))
        .await
        .unwrap();
    assert!(outcome.resent);

    let claims = service
        .tokens()
        .verify_kind(&outcome.token, TokenKind::Invite)
        .unwrap();
    assert_eq!(claims.member_id().unwrap().0, invited.id);
}

#[tokio::test]
async fn resend_rejects_accepted_and_missing_members() {
    let (repo, service) = auth_service();
    let active = seed_active(&repo, "alice@x.com", "longenough1", Role::Member);

    let accepted = service.resend_invite(MemberId::from(active.id)).await;
    assert!(matches!(accepted, Err(AuthError::AlreadyAccepted)));

    let missing = service.resend_invite(MemberId::new()).await;
    assert!(matches!(missing, Err(AuthError::NotFound)));
}

#[tokio::test]
async fn revoke_is_only_legal_while_invited() {
    let (repo, service) = auth_service();

    let invite = service.invite("alice@x.com", "Alice", Role::Member).await.unwrap();
    let member_id = MemberId::from(invite.member.id);

    service.revoke_invite(member_id).await.unwrap();
    assert!(!repo.get(invite.member.id).unwrap().is_active);

    // Revoked invite can no longer be accepted
    let result = service.accept_invite(&invite.token, "longenough1").await;
    assert!(matches!(result, Err(AuthError::AccountDeactivated)));

    // Revoking twice is a bad request
    let again = service.revoke_invite(member_id).await;
    assert!(matches!(again, Err(AuthError::Validation(_))));

    // Revoking an accepted member is a bad request
    let active = seed_active(&repo, "bob@x.com", "longenough1", Role::Member);
    let result = service.revoke_invite(MemberId::from(active.id)).await;
    assert!(matches!(result, Err(AuthError::AlreadyAccepted)));
}
