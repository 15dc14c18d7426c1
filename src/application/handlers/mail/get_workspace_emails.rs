//! GetWorkspaceEmailsHandler - aggregate matching mail across a workspace.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::mail::{EmailSummary, MailQuery, MAIL_PAGE_SIZE};
use crate::ports::{MailProvider, UserRepository, WorkspaceRepository};

/// Query for all emails matching a workspace's lists.
#[derive(Debug, Clone)]
pub struct GetWorkspaceEmailsQuery {
    pub user_id: UserId,
    pub workspace_name: String,
}

/// Handler running one sender-or-subject search per list and concatenating
/// the results, each email tagged with the list it matched. Lists with no
/// matches contribute nothing; any failed search fails the whole operation.
pub struct GetWorkspaceEmailsHandler {
    user_repository: Arc<dyn UserRepository>,
    workspace_repository: Arc<dyn WorkspaceRepository>,
    mail_provider: Arc<dyn MailProvider>,
}

impl GetWorkspaceEmailsHandler {
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

    pub async fn handle(
        &self,
        query: GetWorkspaceEmailsQuery,
    ) -> Result<Vec<EmailSummary>, DomainError> {
        let user = self
            .user_repository
            .find_by_id(&query.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;

        let workspace = self
            .workspace_repository
            .find_by_name(&query.user_id, &query.workspace_name)
            .await?
            .ok_or_else(|| DomainError::not_found("Workspace"))?;

        let mut all_emails = Vec::new();
        for list in &workspace.lists {
            let mail_query = MailQuery::from_sender_or_subject(&list.name);
            let emails = self
                .mail_provider
                .search(&user.refresh_token, &mail_query, MAIL_PAGE_SIZE)
                .await?;

            if emails.is_empty() {
                tracing::debug!(list = %list.name, "No emails matched list");
                continue;
            }

            all_emails.extend(
                emails
                    .into_iter()
                    .map(|email| email.for_list(list.name.clone())),
            );
        }

        Ok(all_emails)
    }
}
