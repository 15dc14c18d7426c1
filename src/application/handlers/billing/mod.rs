//! Billing use cases.

mod create_checkout;
mod handle_payment_webhook;

pub use create_checkout::{CreateCheckoutCommand, CreateCheckoutHandler, PlanPrices};
pub use handle_payment_webhook::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, WebhookOutcome,
};
