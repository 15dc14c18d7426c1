//! Authentication types for the domain layer.
//!
//! These types represent an authenticated caller extracted from a validated
//! session token. They have no provider dependencies; any token scheme can
//! populate them via the `SessionValidator` port.

use super::UserId;
use thiserror::Error;

/// Authenticated caller extracted from a validated session token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The user identifier embedded in the token.
    pub id: UserId,

    /// Email address from the token claims.
    pub email: String,

    /// Whether the token carries the admin flag.
    pub is_admin: bool,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, email: impl Into<String>, is_admin: bool) -> Self {
        Self {
            id,
            email: email.into(),
            is_admin,
        }
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token signature or claims are invalid.
    #[error("Invalid token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// The authentication backend could not be reached.
    #[error("Authentication service unavailable: {0}")]
    ServiceUnavailable(String),
}
