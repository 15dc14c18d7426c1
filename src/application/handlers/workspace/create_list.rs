//! CreateListHandler - create-if-absent workspace, upsert list, fetch mail.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::mail::{EmailSummary, MailQuery, MAIL_PAGE_SIZE};
use crate::domain::workspace::List;
use crate::ports::{MailProvider, UserRepository, WorkspaceRepository};

/// Command to create a list and populate it from the mailbox.
#[derive(Debug, Clone)]
pub struct CreateListCommand {
    pub user_id: UserId,
    pub workspace_name: String,
    pub list_name: String,
}

/// Result of list creation: the list row plus the matching emails.
#[derive(Debug, Clone)]
pub struct CreateListResult {
    pub list: List,
    pub emails: Vec<EmailSummary>,
}

/// Handler for the combined create-list-and-fetch operation.
///
/// The parent workspace is created if absent (an explicit contract, not a
/// side effect of an unrelated code path), the list is upserted so repeat
/// calls do not duplicate it, and the list name is used as the sender filter
/// for the mailbox fetch.
pub struct CreateListHandler {
    user_repository: Arc<dyn UserRepository>,
    workspace_repository: Arc<dyn WorkspaceRepository>,
    mail_provider: Arc<dyn MailProvider>,
}

impl CreateListHandler {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        workspace_repository: Arc<dyn WorkspaceRepository>,
        mail_provider: Arc<dyn MailProvider>,
    ) -> Self {
        Self {
            user_repository,
            workspace_repository,
            mail_provider,
        }
    }

    pub async fn handle(&self, cmd: CreateListCommand) -> Result<CreateListResult, DomainError> {
        let user = self
            .user_repository
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;

        let workspace = self
            .workspace_repository
            .ensure(&cmd.user_id, &cmd.workspace_name)
            .await?;

        let list = self
            .workspace_repository
            .upsert_list(&workspace.id, &cmd.list_name)
            .await?;

        let query = MailQuery::from_sender(&list.name);
        let emails = self
            .mail_provider
            .search(&user.refresh_token, &query, MAIL_PAGE_SIZE)
            .await?;

        tracing::info!(
            user_id = %cmd.user_id,
            workspace = %workspace.name,
            list = %list.name,
            matched = emails.len(),
            "List created and populated"
        );

        Ok(CreateListResult { list, emails })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        email, MockMailProvider, MockUserRepository, MockWorkspaceRepository,
    };
    use crate::domain::foundation::ErrorCode;
    use crate::domain::user::User;
    use crate::ports::MailError;

    fn test_user() -> User {
        User::from_exchange(
            crate::domain::user::IdentityProfile {
                provider_id: "google-123".to_string(),
                email: "alice@gmail.com".to_string(),
                display_name: "Alice".to_string(),
                profile_image: None,
            },
            "at",
            "rt",
            "admin@gmail.com",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn auto_creates_missing_workspace_then_list() {
        let user = test_user();
        let user_id = user.id;
        let users = Arc::new(MockUserRepository::with_user(user));
        let workspaces = Arc::new(MockWorkspaceRepository::default());
        let mail = Arc::new(MockMailProvider::with_emails(vec![email("m1", "Alice")]));

        let handler = CreateListHandler::new(users, workspaces.clone(), mail);
        let result = handler
            .handle(CreateListCommand {
                user_id,
                workspace_name: "Friends".to_string(),
                list_name: "Alice".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.list.name, "Alice");
        assert_eq!(result.emails.len(), 1);

        let ws = workspaces.find(&user_id, "Friends").unwrap();
        assert_eq!(ws.lists.len(), 1);
        assert_eq!(ws.lists[0].name, "Alice");
    }

    #[tokio::test]
    async fn repeat_creation_does_not_duplicate_list() {
        let user = test_user();
        let user_id = user.id;
        let users = Arc::new(MockUserRepository::with_user(user));
        let workspaces = Arc::new(MockWorkspaceRepository::default());
        let mail = Arc::new(MockMailProvider::with_emails(vec![]));

        let handler = CreateListHandler::new(users, workspaces.clone(), mail);
        let cmd = CreateListCommand {
            user_id,
            workspace_name: "Friends".to_string(),
            list_name: "Alice".to_string(),
        };
        handler.handle(cmd.clone()).await.unwrap();
        handler.handle(cmd).await.unwrap();

        let ws = workspaces.find(&user_id, "Friends").unwrap();
        assert_eq!(ws.lists.len(), 1);
    }

    #[tokio::test]
    async fn queries_sender_filter_built_from_list_name() {
        let user = test_user();
        let user_id = user.id;
        let users = Arc::new(MockUserRepository::with_user(user));
        let mail = Arc::new(MockMailProvider::with_emails(vec![]));

        let handler =
            CreateListHandler::new(users, Arc::new(MockWorkspaceRepository::default()), mail.clone());
        handler
            .handle(CreateListCommand {
                user_id,
                workspace_name: "Friends".to_string(),
                list_name: "Alice".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(mail.queries(), vec!["from:\"Alice\"".to_string()]);
    }

    #[tokio::test]
    async fn mail_failure_fails_the_whole_operation() {
        let user = test_user();
        let user_id = user.id;
        let users = Arc::new(MockUserRepository::with_user(user));
        let mail = Arc::new(MockMailProvider::failing(MailError::provider("boom")));

        let handler =
            CreateListHandler::new(users, Arc::new(MockWorkspaceRepository::default()), mail);
        let err = handler
            .handle(CreateListCommand {
                user_id,
                workspace_name: "Friends".to_string(),
                list_name: "Alice".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::UpstreamFailure);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let users = Arc::new(MockUserRepository::default());
        let handler = CreateListHandler::new(
            users,
            Arc::new(MockWorkspaceRepository::default()),
            Arc::new(MockMailProvider::with_emails(vec![])),
        );

        let err = handler
            .handle(CreateListCommand {
                user_id: UserId::new(),
                workspace_name: "Friends".to_string(),
                list_name: "Alice".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
