//! Session token ports.
//!
//! Sessions are stateless signed tokens: `TokenIssuer` mints one after a
//! successful identity exchange, `SessionValidator` checks it on every
//! authenticated request. Keeping both behind ports lets the HTTP middleware
//! stay scheme-agnostic and lets tests swap in a table-backed mock.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::domain::user::User;

/// Port for minting session tokens.
pub trait TokenIssuer: Send + Sync {
    /// Mint a signed token embedding the user's id, email, and admin flag.
    fn issue(&self, user: &User) -> Result<IssuedToken, AuthError>;
}

/// A freshly minted session token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// The signed token string.
    pub token: String,

    /// Seconds until expiry.
    pub expires_in_secs: u64,
}

/// Port for validating session tokens presented by callers.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a token and extract the authenticated caller.
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
