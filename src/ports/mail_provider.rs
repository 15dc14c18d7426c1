//! Mail provider port for mailbox searches.
//!
//! Given a stored refresh credential, implementations list matching message
//! summaries and fetch each message's headers/snippet individually. The
//! per-message fan-out is the adapter's concern; the contract is all-or-nothing:
//! if any sibling fetch fails, the whole search fails.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::mail::{EmailSummary, MailQuery};

/// Port for the external mail provider (Gmail in production).
#[async_trait]
pub trait MailProvider: Send + Sync {
    /// Search the authenticated mailbox.
    ///
    /// Returns up to `max_results` summaries with Subject/From/snippet
    /// resolved (fallback literals applied for absent headers).
    async fn search(
        &self,
        refresh_token: &str,
        query: &MailQuery,
        max_results: u32,
    ) -> Result<Vec<EmailSummary>, MailError>;
}

/// Errors from the mail provider.
#[derive(Debug, Clone)]
pub struct MailError {
    pub code: MailErrorCode,
    pub message: String,
}

/// Mail error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailErrorCode {
    /// The stored refresh credential was rejected.
    CredentialRejected,

    /// The provider did not answer within the configured timeout.
    Timeout,

    /// Any other provider-side failure, including a failed sibling fetch.
    Provider,
}

impl MailError {
    pub fn new(code: MailErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn credential_rejected(message: impl Into<String>) -> Self {
        Self::new(MailErrorCode::CredentialRejected, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(MailErrorCode::Timeout, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(MailErrorCode::Provider, message)
    }
}

impl std::fmt::Display for MailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for MailError {}

impl From<MailError> for DomainError {
    fn from(err: MailError) -> Self {
        let code = match err.code {
            MailErrorCode::CredentialRejected => ErrorCode::Unauthenticated,
            MailErrorCode::Timeout => ErrorCode::UpstreamTimeout,
            MailErrorCode::Provider => ErrorCode::UpstreamFailure,
        };
        DomainError::new(code, err.message)
    }
}
