//! GetWorkspaceHandler - one workspace by name.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::workspace::Workspace;
use crate::ports::WorkspaceRepository;

/// Query for one workspace by name.
#[derive(Debug, Clone)]
pub struct GetWorkspaceQuery {
    pub user_id: UserId,
    pub name: String,
}

/// Handler resolving a workspace by name.
pub struct GetWorkspaceHandler {
    workspace_repository: Arc<dyn WorkspaceRepository>,
}

impl GetWorkspaceHandler {
    pub fn new(workspace_repository: Arc<dyn WorkspaceRepository>) -> Self {
        Self {
            workspace_repository,
        }
    }

    pub async fn handle(&self, query: GetWorkspaceQuery) -> Result<Workspace, DomainError> {
        self.workspace_repository
            .find_by_name(&query.user_id, &query.name)
            .await?
            .ok_or_else(|| DomainError::not_found("Workspace"))
    }
}
