//! Google OAuth2 + Gmail configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Google configuration (OAuth2 identity exchange and Gmail access).
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    /// OAuth2 client ID
    pub client_id: String,

    /// OAuth2 client secret
    pub client_secret: SecretString,

    /// Registered redirect URI for the authorization-code flow
    pub redirect_uri: String,

    /// Email domain allowed to sign in
    #[serde(default = "default_allowed_domain")]
    pub allowed_domain: String,

    /// The one address granted the admin flag at account creation
    pub admin_email: String,
}

impl GoogleConfig {
    /// Validate Google configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.client_id.is_empty() {
            return Err(ValidationError::MissingRequired("GOOGLE_CLIENT_ID"));
        }
        if self.client_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("GOOGLE_CLIENT_SECRET"));
        }
        if self.redirect_uri.is_empty() {
            return Err(ValidationError::MissingRequired("GOOGLE_REDIRECT_URI"));
        }
        if !self.redirect_uri.starts_with("http://") && !self.redirect_uri.starts_with("https://") {
            return Err(ValidationError::InvalidRedirectUri);
        }
        if self.allowed_domain.is_empty() || self.allowed_domain.contains('@') {
            return Err(ValidationError::InvalidAllowedDomain);
        }
        if !self.admin_email.contains('@') {
            return Err(ValidationError::InvalidAdminEmail);
        }
        Ok(())
    }
}

fn default_allowed_domain() -> String {
    "gmail.com".to_string()
}
