//! Axum router for workspace endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::AppState;

use super::handlers::{
    create_list, create_workspace, delete_workspace, get_workspace, list_workspaces, remove_list,
    workspace_emails,
};

/// Workspace routes (all require authentication).
///
/// - `POST /workspaces` - create a workspace
/// - `GET /workspaces` - list workspaces with embedded lists
/// - `GET /workspaces/:name` - one workspace by name
/// - `DELETE /workspaces/:id` - remove a workspace by id
/// - `POST /workspaces/:name/lists/:list_name` - upsert a list and fetch
///   its mail
/// - `GET /workspaces/:name/emails` - aggregate mail across the workspace
/// - `DELETE /workspaces/:name/lists/:list_name` - remove a list
pub fn workspace_routes() -> Router<AppState> {
    Router::new()
        .route("/workspaces", post(create_workspace).get(list_workspaces))
        .route(
            "/workspaces/:name",
            get(get_workspace).delete(delete_workspace),
        )
        .route("/workspaces/:name/emails", get(workspace_emails))
        .route(
            "/workspaces/:name/lists/:list_name",
            post(create_list).delete(remove_list),
        )
}
