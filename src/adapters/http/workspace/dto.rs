//! Request/response DTOs for workspace endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::mail::EmailSummary;
use crate::domain::workspace::{List, Workspace};

/// Body of `POST /workspaces`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkspaceRequest {
    pub name: String,

    /// Optional background image reference.
    pub image_url: Option<String>,
}

/// One workspace with its lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceResponse {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub created_at: String,
    pub lists: Vec<ListResponse>,
}

impl From<Workspace> for WorkspaceResponse {
    fn from(workspace: Workspace) -> Self {
        Self {
            id: workspace.id.to_string(),
            name: workspace.name,
            image_url: workspace.image_url,
            created_at: workspace.created_at.to_string(),
            lists: workspace.lists.into_iter().map(ListResponse::from).collect(),
        }
    }
}

/// One list row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub id: String,
    pub name: String,
    pub created_at: String,
}

impl From<List> for ListResponse {
    fn from(list: List) -> Self {
        Self {
            id: list.id.to_string(),
            name: list.name,
            created_at: list.created_at.to_string(),
        }
    }
}

/// Response of `POST /workspaces/:name/lists/:list_name`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateListResponse {
    pub list_name: String,
    pub emails: Vec<EmailSummary>,
}

/// Response of `GET /workspaces/:name/emails`.
#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceEmailsResponse {
    pub workspace_name: String,
    pub emails: Vec<EmailSummary>,
}
