//! Axum router for authentication endpoints.

use axum::{routing::get, Router};

use crate::adapters::http::AppState;

use super::handlers::{callback, login, me};

/// Authentication routes.
///
/// - `GET /auth/login` - redirect to the provider consent screen
/// - `GET /auth/callback` - complete the exchange, mint a session token
/// - `GET /me` - authenticated profile summary
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(login))
        .route("/auth/callback", get(callback))
        .route("/me", get(me))
}
