//! Identity provider port for the external authorization-code exchange.
//!
//! The provider is responsible for exactly one thing: turning a redirected
//! authorization code into credentials plus a profile. Session establishment
//! and account bookkeeping live in the application layer.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::user::IdentityProfile;

/// Port for external identity providers (Google OAuth2 in production).
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// URL the client should be sent to in order to start the flow.
    fn authorize_url(&self) -> String;

    /// Exchange an authorization code for credentials and a profile.
    async fn exchange_code(&self, code: &str) -> Result<IdentityExchange, IdentityError>;
}

/// Result of a successful code exchange.
#[derive(Debug, Clone)]
pub struct IdentityExchange {
    /// Profile as reported by the provider.
    pub profile: IdentityProfile,

    /// Short-lived access credential.
    pub access_token: String,

    /// Long-lived refresh credential. Only issued when the user (re)grants
    /// offline consent; absent on silent repeat sign-ins.
    pub refresh_token: Option<String>,
}

/// Errors from the identity provider.
#[derive(Debug, Clone)]
pub struct IdentityError {
    pub code: IdentityErrorCode,
    pub message: String,
}

/// Identity error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityErrorCode {
    /// The provider rejected the exchange (bad/expired code, bad client).
    ExchangeFailed,

    /// The provider did not answer within the configured timeout.
    Timeout,

    /// The provider answered but the profile payload was unusable.
    InvalidProfile,
}

impl IdentityError {
    pub fn new(code: IdentityErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn exchange_failed(message: impl Into<String>) -> Self {
        Self::new(IdentityErrorCode::ExchangeFailed, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(IdentityErrorCode::Timeout, message)
    }

    pub fn invalid_profile(message: impl Into<String>) -> Self {
        Self::new(IdentityErrorCode::InvalidProfile, message)
    }
}

impl std::fmt::Display for IdentityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for IdentityError {}

impl From<IdentityError> for DomainError {
    fn from(err: IdentityError) -> Self {
        let code = match err.code {
            IdentityErrorCode::Timeout => ErrorCode::UpstreamTimeout,
            _ => ErrorCode::UpstreamFailure,
        };
        DomainError::new(code, err.message)
    }
}
