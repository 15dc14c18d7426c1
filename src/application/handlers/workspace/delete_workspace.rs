//! DeleteWorkspaceHandler - remove a workspace by id.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId, WorkspaceId};
use crate::ports::WorkspaceRepository;

/// Command to delete a workspace.
#[derive(Debug, Clone)]
pub struct DeleteWorkspaceCommand {
    pub user_id: UserId,
    pub workspace_id: WorkspaceId,
}

/// Handler removing a workspace (and its lists) from the owning user.
pub struct DeleteWorkspaceHandler {
    workspace_repository: Arc<dyn WorkspaceRepository>,
}

impl DeleteWorkspaceHandler {
    pub fn new(workspace_repository: Arc<dyn WorkspaceRepository>) -> Self {
        Self {
            workspace_repository,
        }
    }

    pub async fn handle(&self, cmd: DeleteWorkspaceCommand) -> Result<(), DomainError> {
        let deleted = self
            .workspace_repository
            .delete(&cmd.user_id, &cmd.workspace_id)
            .await?;

        if !deleted {
            return Err(DomainError::not_found("Workspace"));
        }

        tracing::info!(user_id = %cmd.user_id, workspace_id = %cmd.workspace_id, "Workspace deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::MockWorkspaceRepository;
    use crate::ports::WorkspaceRepository as _;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::workspace::Workspace as DomainWorkspace;

    #[tokio::test]
    async fn deletes_owned_workspace() {
        let user_id = UserId::new();
        let repo = Arc::new(MockWorkspaceRepository::default());
        let workspace = DomainWorkspace::new("Old", None).unwrap();
        repo.create(&user_id, &workspace).await.unwrap();

        let handler = DeleteWorkspaceHandler::new(repo.clone());
        handler
            .handle(DeleteWorkspaceCommand {
                user_id,
                workspace_id: workspace.id,
            })
            .await
            .unwrap();

        assert_eq!(repo.workspace_count(), 0);
    }

    #[tokio::test]
    async fn deleting_someone_elses_workspace_is_not_found() {
        let repo = Arc::new(MockWorkspaceRepository::default());
        let owner = UserId::new();
        let workspace = DomainWorkspace::new("Theirs", None).unwrap();
        repo.create(&owner, &workspace).await.unwrap();

        let handler = DeleteWorkspaceHandler::new(repo.clone());
        let err = handler
            .handle(DeleteWorkspaceCommand {
                user_id: UserId::new(),
                workspace_id: workspace.id,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(repo.workspace_count(), 1);
    }
}
