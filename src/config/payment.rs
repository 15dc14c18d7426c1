//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Stripe)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...)
    pub stripe_api_key: SecretString,

    /// Stripe webhook signing secret (whsec_...)
    pub stripe_webhook_secret: SecretString,

    /// Stripe price ID for the monthly plan
    pub monthly_price_id: String,

    /// Stripe price ID for the yearly plan
    pub yearly_price_id: String,

    /// URL the hosted checkout redirects to on success
    #[serde(default = "default_success_url")]
    pub success_url: String,

    /// URL the hosted checkout redirects to on cancel
    #[serde(default = "default_cancel_url")]
    pub cancel_url: String,
}

impl PaymentConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.stripe_api_key.expose_secret().starts_with("sk_test_")
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.stripe_api_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_API_KEY"));
        }
        if self.stripe_webhook_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_WEBHOOK_SECRET"));
        }

        // Verify key prefixes for safety
        if !self.stripe_api_key.expose_secret().starts_with("sk_") {
            return Err(ValidationError::InvalidStripeKey);
        }
        if !self.stripe_webhook_secret.expose_secret().starts_with("whsec_") {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }

        if self.monthly_price_id.is_empty() {
            return Err(ValidationError::MissingRequired("MONTHLY_PRICE_ID"));
        }
        if self.yearly_price_id.is_empty() {
            return Err(ValidationError::MissingRequired("YEARLY_PRICE_ID"));
        }

        Ok(())
    }
}

fn default_success_url() -> String {
    "http://localhost:3000/success".to_string()
}

fn default_cancel_url() -> String {
    "http://localhost:3000/".to_string()
}
