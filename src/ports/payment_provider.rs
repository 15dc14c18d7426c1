//! Payment provider port for hosted checkout and webhook verification.
//!
//! Implementations own the provider API surface: creating checkout sessions
//! in subscription mode and authenticating asynchronously delivered
//! notifications against a shared signing secret. Card data never crosses
//! this boundary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::billing::PlanType;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};

/// Port for payment provider integrations (Stripe in production).
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a hosted checkout session.
    ///
    /// The authenticated user's identifier and the chosen plan are embedded
    /// as opaque metadata so the completion webhook can resolve them. Only
    /// the session handle and redirect URL are returned.
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError>;

    /// Verify a webhook signature and parse the event.
    ///
    /// Returns the parsed event if the signature is valid; any signature or
    /// payload failure is an error and the caller must not trust the payload.
    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, PaymentError>;
}

/// Request to create a checkout session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCheckoutRequest {
    /// Internal user ID (carried as metadata).
    pub user_id: UserId,

    /// Customer email for checkout pre-fill.
    pub email: String,

    /// Provider price identifier chosen by the caller.
    pub price_id: String,

    /// Plan the price identifier resolves to (carried as metadata).
    pub plan: PlanType,

    /// Redirect after successful checkout.
    pub success_url: String,

    /// Redirect after canceled checkout.
    pub cancel_url: String,
}

/// Hosted checkout session handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider's session ID.
    pub id: String,

    /// URL for the customer to complete checkout.
    pub url: String,
}

/// Webhook event from the payment provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Event ID from the provider.
    pub id: String,

    /// Event type.
    pub event_type: WebhookEventType,

    /// Event payload.
    pub data: WebhookEventData,

    /// When the event occurred (Unix timestamp).
    pub created_at: i64,
}

/// Notification kinds. Only checkout completion is acted upon; everything
/// else is acknowledged and ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookEventType {
    /// Checkout session completed successfully.
    CheckoutSessionCompleted,

    /// Any other event type, carried for logging.
    Other(String),
}

/// Webhook event payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WebhookEventData {
    /// Completed-checkout data.
    #[serde(rename = "checkout")]
    Checkout {
        session_id: String,
        /// Internal user ID from session metadata.
        user_id: Option<String>,
        /// Plan from session metadata.
        plan: Option<String>,
        /// Total amount in minor currency units.
        amount_total: Option<i64>,
        /// Provider-reported payment status (e.g. "paid").
        payment_status: Option<String>,
    },

    /// Raw payload for events we do not act on.
    #[serde(rename = "raw")]
    Raw { json: String },
}

/// Errors from payment provider operations.
#[derive(Debug, Clone)]
pub struct PaymentError {
    pub code: PaymentErrorCode,
    pub message: String,
}

/// Payment error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// The provider did not answer within the configured timeout.
    Timeout,

    /// Invalid webhook signature or unparseable payload.
    InvalidWebhook,

    /// Provider API error.
    ProviderError,
}

impl PaymentError {
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::Timeout, message)
    }

    pub fn invalid_webhook(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::InvalidWebhook, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::ProviderError, message)
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

impl From<PaymentError> for DomainError {
    fn from(err: PaymentError) -> Self {
        let code = match err.code {
            PaymentErrorCode::InvalidWebhook => ErrorCode::SignatureInvalid,
            PaymentErrorCode::Timeout => ErrorCode::UpstreamTimeout,
            _ => ErrorCode::UpstreamFailure,
        };
        DomainError::new(code, err.message)
    }
}
