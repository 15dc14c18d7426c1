//! Axum router for mailbox endpoints.

use axum::{routing::get, Router};

use crate::adapters::http::AppState;

use super::handlers::get_inbox;

/// Mailbox routes (require authentication).
///
/// - `GET /mail` - recent inbox grouped by sender category
pub fn mail_routes() -> Router<AppState> {
    Router::new().route("/mail", get(get_inbox))
}
