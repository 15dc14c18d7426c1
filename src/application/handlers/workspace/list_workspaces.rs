//! ListWorkspacesHandler - all workspaces of the caller.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::workspace::Workspace;
use crate::ports::WorkspaceRepository;

/// Query for the caller's workspaces.
#[derive(Debug, Clone)]
pub struct ListWorkspacesQuery {
    pub user_id: UserId,
}

/// Handler returning every workspace of the user, lists embedded.
pub struct ListWorkspacesHandler {
    workspace_repository: Arc<dyn WorkspaceRepository>,
}

impl ListWorkspacesHandler {
    pub fn new(workspace_repository: Arc<dyn WorkspaceRepository>) -> Self {
        Self {
            workspace_repository,
        }
    }

    pub async fn handle(&self, query: ListWorkspacesQuery) -> Result<Vec<Workspace>, DomainError> {
        self.workspace_repository.list_for_user(&query.user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::MockWorkspaceRepository;
    use crate::ports::WorkspaceRepository as _;
    use crate::domain::workspace::Workspace as DomainWorkspace;

    #[tokio::test]
    async fn created_workspace_is_listed_exactly_once() {
        let user_id = UserId::new();
        let repo = Arc::new(MockWorkspaceRepository::default());

        let workspace = DomainWorkspace::new(
            "Promotions",
            Some("https://img.example/bg.png".to_string()),
        )
        .unwrap();
        repo.create(&user_id, &workspace).await.unwrap();

        let handler = ListWorkspacesHandler::new(repo);
        let listed = handler.handle(ListWorkspacesQuery { user_id }).await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Promotions");
        assert_eq!(
            listed[0].image_url.as_deref(),
            Some("https://img.example/bg.png")
        );
    }

    #[tokio::test]
    async fn other_users_workspaces_are_not_listed() {
        let repo = Arc::new(MockWorkspaceRepository::default());
        let other = UserId::new();
        repo.create(&other, &DomainWorkspace::new("Private", None).unwrap())
            .await
            .unwrap();

        let handler = ListWorkspacesHandler::new(repo);
        let listed = handler
            .handle(ListWorkspacesQuery {
                user_id: UserId::new(),
            })
            .await
            .unwrap();

        assert!(listed.is_empty());
    }
}
