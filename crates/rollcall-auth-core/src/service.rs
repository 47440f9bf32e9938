//! Auth service - member credential lifecycle operations
//!
//! Ties together the token service, password hashing, and the member
//! repository. All operations are request-scoped and stateless between
//! calls; correctness relies on the store's per-record atomicity.

use std::sync::Arc;

use rollcall_db::{CreateMember, MemberRepository, MemberRow};
use rollcall_types::{normalize_email, MemberId, Role};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::guard::Identity;
use crate::password::{check_password, hash_password, verify_password};
use crate::token::{TokenKind, TokenPair, TokenService};

/// A member together with a freshly issued token pair
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub member: MemberRow,
    pub tokens: TokenPair,
}

/// Result of issuing (or re-issuing) an invite
#[derive(Debug, Clone)]
pub struct InviteOutcome {
    pub member: MemberRow,
    /// Invite token for out-of-band delivery; never returned to clients
    pub token: String,
    /// True when an existing pending invite was re-issued
    pub resent: bool,
}

/// Read-only pre-flight result for an invite token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InviteCheck {
    /// Invite is still pending; password may be set
    Valid { email: String, name: String },
    /// Member already completed acceptance
    AlreadyAccepted,
    /// Invite was revoked or the account deactivated
    Deactivated,
}

/// A minted password reset, handed to the mailer collaborator
#[derive(Debug, Clone)]
pub struct PasswordReset {
    pub member_id: MemberId,
    pub email: String,
    /// Reset token for out-of-band delivery; never returned to clients
    pub token: String,
}

/// Authentication service generic over the credential store
pub struct AuthService<R: MemberRepository> {
    tokens: TokenService,
    members: Arc<R>,
}

impl<R: MemberRepository> AuthService<R> {
    /// Create a new auth service
    pub fn new(config: AuthConfig, members: Arc<R>) -> Self {
        Self {
            tokens: TokenService::new(config),
            members,
        }
    }

    /// Access the token service (used by the hosting layer to resolve
    /// bearer tokens to identities)
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    // =========================================================================
    // Registration and login
    // =========================================================================

    /// Public self-service registration; creates an active MEMBER directly
    pub async fn register(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        check_password(password)?;

        let email = normalize_email(email);
        let hash = hash_password(password).await?;

        // Uniqueness is enforced by the store; a duplicate insert maps to
        // CONFLICT without a racy pre-check.
        let member = self
            .members
            .create(CreateMember {
                id: Uuid::new_v4(),
                email,
                name: name.to_string(),
                password_hash: Some(hash),
                role: Role::Member.to_string(),
            })
            .await?;

        let tokens = self.tokens.sign_pair(member.member_id(), Role::Member)?;
        tracing::info!(member_id = %member.member_id(), "Member registered");

        Ok(AuthSession { member, tokens })
    }

    /// Login with email and password
    ///
    /// Unknown email, missing password hash, and wrong password all
    /// collapse into `InvalidCredentials`; only a deactivated account with
    /// matching credentials is reported distinctly.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let email = normalize_email(email);

        let member = self
            .members
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let hash = member
            .password_hash
            .as_deref()
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, hash).await? {
            return Err(AuthError::InvalidCredentials);
        }

        if !member.is_active {
            return Err(AuthError::AccountDeactivated);
        }

        let tokens = self
            .tokens
            .sign_pair(member.member_id(), member.parsed_role())?;

        Ok(AuthSession { member, tokens })
    }

    /// Exchange a refresh token for a new access/refresh pair (rotation)
    ///
    /// Any token failure or a missing subject collapses into a single
    /// UNAUTHORIZED rejection.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let claims = self
            .tokens
            .verify_kind(refresh_token, TokenKind::Refresh)
            .map_err(|e| match e {
                AuthError::Storage(_) | AuthError::Internal(_) => e,
                _ => AuthError::Unauthenticated,
            })?;

        let member_id = claims.member_id().map_err(|_| AuthError::Unauthenticated)?;

        let member = self
            .members
            .find_by_id(member_id.0)
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        if !member.is_active {
            return Err(AuthError::AccountDeactivated);
        }

        self.tokens
            .sign_pair(member.member_id(), member.parsed_role())
    }

    // =========================================================================
    // Invites
    // =========================================================================

    /// Issue an invite, creating an invited member record
    ///
    /// If a pending invite already exists for the email, the token is
    /// re-issued without creating a duplicate record. An email belonging
    /// to any non-invited member is a CONFLICT.
    pub async fn invite(
        &self,
        email: &str,
        name: &str,
        role: Role,
    ) -> Result<InviteOutcome, AuthError> {
        let email = normalize_email(email);

        if let Some(existing) = self.members.find_by_email(&email).await? {
            if existing.password_hash.is_none() && existing.is_active {
                // Pending invite: resend rather than duplicate
                let token = self.tokens.sign_invite(existing.member_id())?;
                tracing::info!(member_id = %existing.member_id(), "Invite re-issued");
                return Ok(InviteOutcome {
                    member: existing,
                    token,
                    resent: true,
                });
            }
            return Err(AuthError::DuplicateEmail);
        }

        let member = self
            .members
            .create(CreateMember {
                id: Uuid::new_v4(),
                email,
                name: name.to_string(),
                password_hash: None,
                role: role.to_string(),
            })
            .await?;

        let token = self.tokens.sign_invite(member.member_id())?;
        tracing::info!(member_id = %member.member_id(), role = %role, "Member invited");

        Ok(InviteOutcome {
            member,
            token,
            resent: false,
        })
    }

    /// Accept an invite, setting the first password
    ///
    /// Transitions Invited -> Active, marks the email verified, and issues
    /// a fresh token pair. A cryptographically valid invite for a member
    /// that already has a password is semantically stale and rejected.
    pub async fn accept_invite(
        &self,
        invite_token: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let claims = self.tokens.verify_kind(invite_token, TokenKind::Invite)?;
        let member_id = claims.member_id()?;

        let mut member = self
            .members
            .find_by_id(member_id.0)
            .await?
            .ok_or(AuthError::NotFound)?;

        if member.password_hash.is_some() {
            return Err(AuthError::AlreadyAccepted);
        }
        if !member.is_active {
            return Err(AuthError::AccountDeactivated);
        }

        check_password(password)?;
        let hash = hash_password(password).await?;

        self.members
            .update_password_hash(member_id.0, &hash)
            .await?;
        self.members.update_email_verified(member_id.0, true).await?;

        member.password_hash = Some(hash);
        member.email_verified = true;

        let tokens = self
            .tokens
            .sign_pair(member.member_id(), member.parsed_role())?;
        tracing::info!(member_id = %member_id, "Invite accepted");

        Ok(AuthSession { member, tokens })
    }

    /// Read-only pre-flight of an invite token
    ///
    /// Reports the same outcomes as acceptance (valid / already accepted /
    /// deactivated) without mutating anything.
    pub async fn validate_invite(&self, invite_token: &str) -> Result<InviteCheck, AuthError> {
        let claims = self.tokens.verify_kind(invite_token, TokenKind::Invite)?;
        let member_id = claims.member_id()?;

        let member = self
            .members
            .find_by_id(member_id.0)
            .await?
            .ok_or(AuthError::NotFound)?;

        if member.password_hash.is_some() {
            return Ok(InviteCheck::AlreadyAccepted);
        }
        if !member.is_active {
            return Ok(InviteCheck::Deactivated);
        }

        Ok(InviteCheck::Valid {
            email: member.email,
            name: member.name,
        })
    }

    /// Mint a new invite token for an already-invited member
    pub async fn resend_invite(&self, member_id: MemberId) -> Result<InviteOutcome, AuthError> {
        let member = self
            .members
            .find_by_id(member_id.0)
            .await?
            .ok_or(AuthError::NotFound)?;

        if member.password_hash.is_some() {
            return Err(AuthError::AlreadyAccepted);
        }
        if !member.is_active {
            return Err(AuthError::Validation("invite is not pending"));
        }

        let token = self.tokens.sign_invite(member.member_id())?;

        Ok(InviteOutcome {
            member,
            token,
            resent: true,
        })
    }

    /// Revoke a pending invite (Invited -> Revoked)
    pub async fn revoke_invite(&self, member_id: MemberId) -> Result<(), AuthError> {
        let member = self
            .members
            .find_by_id(member_id.0)
            .await?
            .ok_or(AuthError::NotFound)?;

        if member.password_hash.is_some() {
            return Err(AuthError::AlreadyAccepted);
        }
        if !member.is_active {
            return Err(AuthError::Validation("invite is already revoked"));
        }

        self.members.update_active(member_id.0, false).await?;
        tracing::info!(member_id = %member_id, "Invite revoked");

        Ok(())
    }

    // =========================================================================
    // Password reset and change
    // =========================================================================

    /// Request a password reset
    ///
    /// Always succeeds from the caller's perspective; a token is minted
    /// only when the email matches an active member, and is returned here
    /// solely for out-of-band delivery.
    pub async fn forgot_password(&self, email: &str) -> Result<Option<PasswordReset>, AuthError> {
        let email = normalize_email(email);

        match self.members.find_by_email(&email).await? {
            Some(member) if member.is_active => {
                let token = self.tokens.sign_reset(member.member_id())?;
                Ok(Some(PasswordReset {
                    member_id: member.member_id(),
                    email: member.email,
                    token,
                }))
            }
            _ => {
                // Indistinguishable from the match case to the caller
                tracing::debug!("Password reset requested for unknown or inactive email");
                Ok(None)
            }
        }
    }

    /// Set a new password via a reset token
    pub async fn reset_password(
        &self,
        reset_token: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let claims = self.tokens.verify_kind(reset_token, TokenKind::Reset)?;
        let member_id = claims.member_id()?;

        let member = self
            .members
            .find_by_id(member_id.0)
            .await?
            .ok_or(AuthError::NotFound)?;

        check_password(new_password)?;
        let hash = hash_password(new_password).await?;

        self.members
            .update_password_hash(member.id, &hash)
            .await?;
        tracing::info!(member_id = %member_id, "Password reset");

        Ok(())
    }

    /// Change the password of an authenticated member
    ///
    /// The literal-equality check on the new password runs before the
    /// current password is verified against the stored hash.
    pub async fn change_password(
        &self,
        identity: &Identity,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        if new_password == current_password {
            return Err(AuthError::Validation(
                "new password must differ from current password",
            ));
        }
        check_password(new_password)?;

        let member = self
            .members
            .find_by_id(identity.member_id.0)
            .await?
            .ok_or(AuthError::NotFound)?;

        let hash = member
            .password_hash
            .as_deref()
            .ok_or(AuthError::Validation("current password is incorrect"))?;

        if !verify_password(current_password, hash).await? {
            return Err(AuthError::Validation("current password is incorrect"));
        }

        let new_hash = hash_password(new_password).await?;
        self.members
            .update_password_hash(member.id, &new_hash)
            .await?;
        tracing::info!(member_id = %identity.member_id, "Password changed");

        Ok(())
    }

    // =========================================================================
    // Role and activation management
    // =========================================================================

    /// Change a member's role; actors can never change their own
    pub async fn update_role(
        &self,
        actor_id: MemberId,
        target_id: MemberId,
        new_role: Role,
    ) -> Result<MemberRow, AuthError> {
        if actor_id == target_id {
            return Err(AuthError::SelfActionForbidden);
        }

        let mut member = self
            .members
            .find_by_id(target_id.0)
            .await?
            .ok_or(AuthError::NotFound)?;

        self.members
            .update_role(target_id.0, &new_role.to_string())
            .await?;
        member.role = new_role.to_string();
        tracing::info!(member_id = %target_id, role = %new_role, "Role updated");

        Ok(member)
    }

    /// Deactivate a member; actors can never deactivate themselves
    pub async fn deactivate(
        &self,
        actor_id: MemberId,
        target_id: MemberId,
    ) -> Result<(), AuthError> {
        if actor_id == target_id {
            return Err(AuthError::SelfActionForbidden);
        }

        let member = self
            .members
            .find_by_id(target_id.0)
            .await?
            .ok_or(AuthError::NotFound)?;

        if !member.is_active {
            return Err(AuthError::Validation("account is already deactivated"));
        }

        self.members.update_active(target_id.0, false).await?;
        tracing::info!(member_id = %target_id, "Member deactivated");

        Ok(())
    }

    /// Reactivate a previously deactivated member
    pub async fn reactivate(&self, target_id: MemberId) -> Result<(), AuthError> {
        let member = self
            .members
            .find_by_id(target_id.0)
            .await?
            .ok_or(AuthError::NotFound)?;

        if member.is_active {
            return Err(AuthError::Validation("account is already active"));
        }

        self.members.update_active(target_id.0, true).await?;
        tracing::info!(member_id = %target_id, "Member reactivated");

        Ok(())
    }

    /// Look up a member by ID
    pub async fn get_member(&self, member_id: MemberId) -> Result<MemberRow, AuthError> {
        self.members
            .find_by_id(member_id.0)
            .await?
            .ok_or(AuthError::NotFound)
    }
}

impl<R: MemberRepository> std::fmt::Debug for AuthService<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService").finish_non_exhaustive()
    }
}
