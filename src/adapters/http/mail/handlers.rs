//! HTTP handlers for mailbox endpoints.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::AppState;
use crate::application::handlers::mail::GetInboxQuery;

/// GET /mail - a page of the caller's inbox grouped by sender.
pub async fn get_inbox(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.get_inbox_handler();
    let inbox = handler.handle(GetInboxQuery { user_id: caller.id }).await?;
    Ok(Json(inbox))
}
