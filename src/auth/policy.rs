//! Role checks applied after the caller has been authenticated.

use tracing::warn;

use super::{error::AuthError, extractors::AuthUser, repo_types::Role};

/// Permission an operation requires.
#[derive(Debug, Clone, Copy)]
pub enum Policy<'a> {
    /// Any caller with a valid token.
    Authenticated,
    /// Admins, or the caller whose username created the resource.
    OwnerOrAdmin { owner: &'a str },
    /// Admins only.
    AdminOnly,
}

impl Policy<'_> {
    pub fn authorize(&self, caller: &AuthUser) -> Result<(), AuthError> {
        let allowed = match (self, caller.role) {
            (Policy::Authenticated, _) => true,
            (_, Role::Admin) => true,
            (Policy::OwnerOrAdmin { owner }, Role::User) => caller.username == *owner,
            (Policy::AdminOnly, Role::User) => false,
        };
        if allowed {
            return Ok(());
        }

        warn!(user_id = caller.id, username = %caller.username, policy = ?self, "access denied");
        Err(AuthError::Forbidden(match self {
            Policy::AdminOnly => "Access denied. Admin only.",
            _ => "Access denied. Insufficient permissions.",
        }))
    }
}
