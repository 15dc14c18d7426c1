//! RemoveListHandler - pull a list out of its workspace by name.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::WorkspaceRepository;

/// Command to remove a list.
#[derive(Debug, Clone)]
pub struct RemoveListCommand {
    pub user_id: UserId,
    pub workspace_name: String,
    pub list_name: String,
}

/// Handler removing a list from the named workspace.
pub struct RemoveListHandler {
    workspace_repository: Arc<dyn WorkspaceRepository>,
}

impl RemoveListHandler {
    pub fn new(workspace_repository: Arc<dyn WorkspaceRepository>) -> Self {
        Self {
            workspace_repository,
        }
    }

    pub async fn handle(&self, cmd: RemoveListCommand) -> Result<(), DomainError> {
        let workspace = self
            .workspace_repository
            .find_by_name(&cmd.user_id, &cmd.workspace_name)
            .await?
            .ok_or_else(|| DomainError::not_found("Workspace"))?;

        let removed = self
            .workspace_repository
            .remove_list(&workspace.id, &cmd.list_name)
            .await?;

        if !removed {
            return Err(DomainError::not_found("List"));
        }

        tracing::info!(
            user_id = %cmd.user_id,
            workspace = %workspace.name,
            list = %cmd.list_name,
            "List removed"
        );
        Ok(())
    }
}
