//! Guard chain for request authorization
//!
//! Guards are predicate-then-forward steps held in an ordered list, not a
//! type hierarchy. Each chain is built by layering on the public base;
//! `authorize` walks the list in order and short-circuits on the first
//! rejection.

use rollcall_types::{MemberId, Role};

use crate::error::AuthError;

/// Identity resolved from a verified access token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub member_id: MemberId,
    pub role: Role,
}

/// Per-request context carrying the optionally resolved identity
///
/// The hosting layer resolves the bearer token once, before any guard
/// runs; guards only inspect the result.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub identity: Option<Identity>,
}

impl RequestContext {
    /// Context with a resolved identity
    pub fn authenticated(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    /// Context with no identity
    pub fn anonymous() -> Self {
        Self { identity: None }
    }
}

/// A single predicate step in a guard chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Requires a resolved identity
    Authenticated,
    /// Requires role >= MANAGER
    ManagerOrAbove,
    /// Requires role == ADMIN
    AdminOnly,
}

impl Guard {
    /// Check this guard against the context
    fn check(&self, ctx: &RequestContext) -> Result<(), AuthError> {
        match self {
            Self::Authenticated => {
                if ctx.identity.is_none() {
                    return Err(AuthError::Unauthenticated);
                }
                Ok(())
            }
            Self::ManagerOrAbove => match ctx.identity {
                Some(identity) if identity.role.is_manager_or_above() => Ok(()),
                Some(_) => Err(AuthError::InsufficientRole),
                None => Err(AuthError::Unauthenticated),
            },
            Self::AdminOnly => match ctx.identity {
                Some(identity) if identity.role.is_admin() => Ok(()),
                Some(_) => Err(AuthError::InsufficientRole),
                None => Err(AuthError::Unauthenticated),
            },
        }
    }
}

/// An ordered list of guards applied before a handler runs
#[derive(Debug, Clone, Default)]
pub struct GuardChain {
    guards: Vec<Guard>,
}

impl GuardChain {
    /// The unguarded base; identity passes through unchanged
    pub fn public() -> Self {
        Self { guards: Vec::new() }
    }

    /// Public base plus the authenticated guard
    pub fn authenticated() -> Self {
        Self::public().then(Guard::Authenticated)
    }

    /// Authenticated plus the manager-or-above guard
    pub fn manager_or_above() -> Self {
        Self::authenticated().then(Guard::ManagerOrAbove)
    }

    /// Authenticated plus the admin-only guard
    pub fn admin_only() -> Self {
        Self::authenticated().then(Guard::AdminOnly)
    }

    /// Layer another guard on top of this chain
    pub fn then(mut self, guard: Guard) -> Self {
        self.guards.push(guard);
        self
    }

    /// Run every guard in order, short-circuiting on the first rejection
    pub fn authorize<'a>(&self, ctx: &'a RequestContext) -> Result<Option<&'a Identity>, AuthError> {
        for guard in &self.guards {
            guard.check(ctx)?;
        }
        Ok(ctx.identity.as_ref())
    }

    /// Authorize and return the identity; the chain must contain at least
    /// the authenticated guard for this to succeed
    pub fn require<'a>(&self, ctx: &'a RequestContext) -> Result<&'a Identity, AuthError> {
        self.authorize(ctx)?.ok_or(AuthError::Unauthenticated)
    }
}
