//! HTTP handlers for workspace and list endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::AppState;
use crate::application::handlers::mail::GetWorkspaceEmailsQuery;
use crate::application::handlers::workspace::{
    CreateListCommand, CreateWorkspaceCommand, DeleteWorkspaceCommand, GetWorkspaceQuery,
    ListWorkspacesQuery, RemoveListCommand,
};
use crate::domain::foundation::{DomainError, WorkspaceId};

use super::dto::{
    CreateListResponse, CreateWorkspaceRequest, WorkspaceEmailsResponse, WorkspaceResponse,
};

/// POST /workspaces - create a workspace.
pub async fn create_workspace(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Json(request): Json<CreateWorkspaceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.create_workspace_handler();
    let workspace = handler
        .handle(CreateWorkspaceCommand {
            user_id: caller.id,
            name: request.name,
            image_url: request.image_url,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(WorkspaceResponse::from(workspace))))
}

/// GET /workspaces - all workspaces of the caller.
pub async fn list_workspaces(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.list_workspaces_handler();
    let workspaces = handler
        .handle(ListWorkspacesQuery { user_id: caller.id })
        .await?;

    let response: Vec<WorkspaceResponse> =
        workspaces.into_iter().map(WorkspaceResponse::from).collect();
    Ok(Json(response))
}

/// GET /workspaces/:name - one workspace by name.
pub async fn get_workspace(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.get_workspace_handler();
    let workspace = handler
        .handle(GetWorkspaceQuery {
            user_id: caller.id,
            name,
        })
        .await?;

    Ok(Json(WorkspaceResponse::from(workspace)))
}

/// DELETE /workspaces/:id - remove a workspace by id.
pub async fn delete_workspace(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let workspace_id: WorkspaceId = id
        .parse()
        .map_err(|_| DomainError::validation("Workspace id must be a UUID"))?;

    let handler = state.delete_workspace_handler();
    handler
        .handle(DeleteWorkspaceCommand {
            user_id: caller.id,
            workspace_id,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /workspaces/:name/lists/:list_name - create-if-absent workspace,
/// upsert the list, and return the matching emails.
pub async fn create_list(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path((workspace_name, list_name)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.create_list_handler();
    let result = handler
        .handle(CreateListCommand {
            user_id: caller.id,
            workspace_name,
            list_name,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateListResponse {
            list_name: result.list.name,
            emails: result.emails,
        }),
    ))
}

/// DELETE /workspaces/:name/lists/:list_name - remove a list by name.
pub async fn remove_list(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path((workspace_name, list_name)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.remove_list_handler();
    handler
        .handle(RemoveListCommand {
            user_id: caller.id,
            workspace_name,
            list_name,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /workspaces/:name/emails - aggregate matching mail across the
/// workspace's lists.
pub async fn workspace_emails(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path(workspace_name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.get_workspace_emails_handler();
    let emails = handler
        .handle(GetWorkspaceEmailsQuery {
            user_id: caller.id,
            workspace_name: workspace_name.clone(),
        })
        .await?;

    Ok(Json(WorkspaceEmailsResponse {
        workspace_name,
        emails,
    }))
}
