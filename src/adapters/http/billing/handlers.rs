//! HTTP handlers for billing endpoints.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::AppState;
use crate::application::handlers::billing::{
    CreateCheckoutCommand, HandlePaymentWebhookCommand,
};
use crate::domain::foundation::{DomainError, ErrorCode};

use super::dto::{CheckoutResponse, CreateCheckoutRequest, WebhookAck};

/// POST /checkout-session - start the hosted checkout flow.
pub async fn create_checkout_session(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Json(request): Json<CreateCheckoutRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.create_checkout_handler();
    let session = handler
        .handle(CreateCheckoutCommand {
            user_id: caller.id,
            price_id: request.price_id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse {
            id: session.id,
            url: session.url,
        }),
    ))
}

/// POST /payment-webhook - provider notifications.
///
/// Signature verification gates everything: a bad signature is a 400 and the
/// store is untouched. Once the signature passes, the delivery is always
/// acknowledged with 200 - including duplicate payments and unknown users -
/// so the provider does not redeliver a business-level no-op.
pub async fn payment_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let signature = headers
        .get("Stripe-Signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            DomainError::new(ErrorCode::SignatureInvalid, "Missing Stripe-Signature header")
        })?;

    let handler = state.handle_payment_webhook_handler();
    let outcome = handler
        .handle(HandlePaymentWebhookCommand {
            payload: body.to_vec(),
            signature: signature.to_string(),
        })
        .await?;

    tracing::debug!(?outcome, "Webhook processed");
    Ok(Json(WebhookAck { received: true }))
}
