//! GetInboxHandler - whole-inbox fetch grouped by sender.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::mail::{EmailSummary, MailQuery, MAIL_PAGE_SIZE};
use crate::ports::{MailProvider, UserRepository};

/// Query for the caller's recent inbox.
#[derive(Debug, Clone)]
pub struct GetInboxQuery {
    pub user_id: UserId,
}

/// Handler fetching a page of the mailbox and grouping it by sender
/// display name (the part of `From` before any `<address>`).
pub struct GetInboxHandler {
    user_repository: Arc<dyn UserRepository>,
    mail_provider: Arc<dyn MailProvider>,
}

impl GetInboxHandler {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        mail_provider: Arc<dyn MailProvider>,
    ) -> Self {
        Self {
            user_repository,
            mail_provider,
        }
    }

    pub async fn handle(
        &self,
        query: GetInboxQuery,
    ) -> Result<BTreeMap<String, Vec<EmailSummary>>, DomainError> {
        let user = self
            .user_repository
            .find_by_id(&query.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;

        let emails = self
            .mail_provider
            .search(&user.refresh_token, &MailQuery::all(), MAIL_PAGE_SIZE)
            .await?;

        let mut categorized: BTreeMap<String, Vec<EmailSummary>> = BTreeMap::new();
        for email in emails {
            categorized
                .entry(email.sender_category())
                .or_default()
                .push(email);
        }

        Ok(categorized)
    }
}
