//! Axum router for billing endpoints.

use axum::{routing::post, Router};

use crate::adapters::http::AppState;

use super::handlers::{create_checkout_session, payment_webhook};

/// Billing routes.
///
/// - `POST /checkout-session` - start hosted checkout (requires auth)
/// - `POST /payment-webhook` - provider notifications (signature verified,
///   no session auth)
pub fn billing_routes() -> Router<AppState> {
    Router::new()
        .route("/checkout-session", post(create_checkout_session))
        .route("/payment-webhook", post(payment_webhook))
}
