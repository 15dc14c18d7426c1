//! CreateWorkspaceHandler - explicit workspace creation.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::workspace::Workspace;
use crate::ports::WorkspaceRepository;

/// Command to create a workspace.
#[derive(Debug, Clone)]
pub struct CreateWorkspaceCommand {
    pub user_id: UserId,
    pub name: String,
    pub image_url: Option<String>,
}

/// Handler for explicit workspace creation.
pub struct CreateWorkspaceHandler {
    workspace_repository: Arc<dyn WorkspaceRepository>,
}

impl CreateWorkspaceHandler {
    pub fn new(workspace_repository: Arc<dyn WorkspaceRepository>) -> Self {
        Self {
            workspace_repository,
        }
    }

    pub async fn handle(&self, cmd: CreateWorkspaceCommand) -> Result<Workspace, DomainError> {
        let workspace = Workspace::new(cmd.name, cmd.image_url)?;
        self.workspace_repository
            .create(&cmd.user_id, &workspace)
            .await?;

        tracing::info!(user_id = %cmd.user_id, workspace = %workspace.name, "Workspace created");
        Ok(workspace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::MockWorkspaceRepository;
    use crate::domain::foundation::ErrorCode;

    #[tokio::test]
    async fn creates_workspace_with_image() {
        let repo = Arc::new(MockWorkspaceRepository::default());
        let handler = CreateWorkspaceHandler::new(repo.clone());

        let workspace = handler
            .handle(CreateWorkspaceCommand {
                user_id: UserId::new(),
                name: "Newsletters".to_string(),
                image_url: Some("https://img.example/bg.png".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(workspace.name, "Newsletters");
        assert_eq!(repo.workspace_count(), 1);
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected() {
        let user_id = UserId::new();
        let repo = Arc::new(MockWorkspaceRepository::default());
        let handler = CreateWorkspaceHandler::new(repo.clone());

        let cmd = CreateWorkspaceCommand {
            user_id,
            name: "Work".to_string(),
            image_url: None,
        };
        handler.handle(cmd.clone()).await.unwrap();

        let err = handler.handle(cmd).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateName);
        assert_eq!(repo.workspace_count(), 1);
    }

    #[tokio::test]
    async fn blank_name_fails_validation() {
        let repo = Arc::new(MockWorkspaceRepository::default());
        let handler = CreateWorkspaceHandler::new(repo);

        let err = handler
            .handle(CreateWorkspaceCommand {
                user_id: UserId::new(),
                name: "   ".to_string(),
                image_url: None,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
