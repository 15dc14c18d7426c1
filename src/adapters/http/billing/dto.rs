//! Request/response DTOs for billing endpoints.

use serde::{Deserialize, Serialize};

/// Body of `POST /checkout-session`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCheckoutRequest {
    /// Price identifier of the chosen plan.
    pub price_id: String,
}

/// Response of `POST /checkout-session`: the session handle only, never
/// card data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub id: String,
    pub url: String,
}

/// Acknowledgment body for webhook deliveries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookAck {
    pub received: bool,
}
