//! HTTP handlers for authentication endpoints.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect};
use axum::Json;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::AppState;
use crate::application::handlers::auth::CompleteSignInCommand;
use crate::domain::foundation::DomainError;

use super::dto::{CallbackQuery, MeResponse, SignInResponse, UserResponse};

/// GET /auth/login - send the client to the provider's consent screen.
pub async fn login(State(state): State<AppState>) -> impl IntoResponse {
    Redirect::temporary(&state.identity_provider.authorize_url())
}

/// GET /auth/callback - complete the exchange and return a session token.
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.complete_sign_in_handler();
    let result = handler
        .handle(CompleteSignInCommand { code: query.code })
        .await?;

    let response = SignInResponse {
        token: result.token.token,
        expires_in_secs: result.token.expires_in_secs,
        created: result.created,
        user: UserResponse::from(&result.user),
    };

    Ok(Json(response))
}

/// GET /me - profile summary for the authenticated caller.
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .user_repository
        .find_by_id(&caller.id)
        .await?
        .ok_or_else(|| DomainError::not_found("User"))?;

    let has_paid = state.transaction_repository.has_any(&caller.id).await?;

    Ok(Json(MeResponse {
        user: UserResponse::from(&user),
        has_paid,
    }))
}
