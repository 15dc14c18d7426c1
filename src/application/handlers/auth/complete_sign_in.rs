//! CompleteSignInHandler - exchange an authorization code and establish a session.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::user::User;
use crate::ports::{IdentityProvider, IssuedToken, TokenIssuer, UserRepository};

/// Command to complete a sign-in from the provider redirect.
#[derive(Debug, Clone)]
pub struct CompleteSignInCommand {
    /// Authorization code from the callback query string.
    pub code: String,
}

/// Result of a completed sign-in.
#[derive(Debug, Clone)]
pub struct CompleteSignInResult {
    /// Session token for the caller.
    pub token: IssuedToken,

    /// The signed-in account.
    pub user: User,

    /// Whether the account was created by this exchange.
    pub created: bool,
}

/// Handler for the authorization-code callback.
///
/// Exchanges the code, enforces the allowed email domain, creates or
/// refreshes the account, and mints a session token. No record is written
/// when the exchange fails or the domain is rejected.
pub struct CompleteSignInHandler {
    identity_provider: Arc<dyn IdentityProvider>,
    user_repository: Arc<dyn UserRepository>,
    token_issuer: Arc<dyn TokenIssuer>,
    allowed_domain: String,
    admin_email: String,
}

impl CompleteSignInHandler {
    pub fn new(
        identity_provider: Arc<dyn IdentityProvider>,
        user_repository: Arc<dyn UserRepository>,
        token_issuer: Arc<dyn TokenIssuer>,
        allowed_domain: impl Into<String>,
        admin_email: impl Into<String>,
    ) -> Self {
        Self {
            identity_provider,
            user_repository,
            token_issuer,
            allowed_domain: allowed_domain.into(),
            admin_email: admin_email.into(),
        }
    }

    pub async fn handle(
        &self,
        cmd: CompleteSignInCommand,
    ) -> Result<CompleteSignInResult, DomainError> {
        // 1. Exchange the code; a provider failure creates no partial record.
        let exchange = self.identity_provider.exchange_code(&cmd.code).await?;

        // 2. Enforce the allowed consumer-mail domain before touching the store.
        if !exchange.profile.is_from_domain(&self.allowed_domain) {
            tracing::info!(
                domain = exchange.profile.email_domain().unwrap_or("<none>"),
                "Sign-in refused: email domain not allowed"
            );
            return Err(DomainError::new(
                ErrorCode::Unauthorized,
                format!("Sign-in is restricted to @{} accounts", self.allowed_domain),
            ));
        }

        // 3. Create on first exchange, otherwise refresh changed fields only.
        let existing = self
            .user_repository
            .find_by_google_id(&exchange.profile.provider_id)
            .await?;

        let (user, created) = match existing {
            None => {
                let user = User::from_exchange(
                    exchange.profile,
                    exchange.access_token,
                    exchange.refresh_token.unwrap_or_default(),
                    &self.admin_email,
                )?;
                self.user_repository.create(&user).await?;
                tracing::info!(user_id = %user.id, "Account created");
                (user, true)
            }
            Some(mut user) => {
                let changed = user.refresh_from_exchange(
                    &exchange.profile,
                    &exchange.access_token,
                    exchange.refresh_token.as_deref(),
                );
                if changed {
                    self.user_repository.update_credentials(&user).await?;
                    tracing::debug!(user_id = %user.id, "Credentials refreshed");
                }
                (user, false)
            }
        };

        // 4. Mint the session token.
        let token = self.token_issuer.issue(&user).map_err(|e| {
            DomainError::new(ErrorCode::InternalError, format!("Token issue failed: {}", e))
        })?;

        Ok(CompleteSignInResult {
            token,
            user,
            created,
        })
    }
}
