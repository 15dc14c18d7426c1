//! In-memory port implementations shared by handler tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::billing::Transaction;
use crate::domain::foundation::{DomainError, UserId, WorkspaceId};
use crate::domain::mail::{EmailSummary, MailQuery};
use crate::domain::user::User;
use crate::domain::workspace::{List, Workspace};
use crate::ports::{
    MailError, MailProvider, TransactionRepository, UserRepository, WorkspaceRepository,
};

/// Builds a minimal email summary for assertions.
pub fn email(id: &str, from: &str) -> EmailSummary {
    EmailSummary::from_parts(
        id,
        Some(format!("Mail from {}", from)),
        Some(from.to_string()),
        Some("snippet".to_string()),
    )
}

// ════════════════════════════════════════════════════════════════════════════════
// Users
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct MockUserRepository {
    users: Mutex<Vec<User>>,
}

impl MockUserRepository {
    pub fn with_user(user: User) -> Self {
        Self {
            users: Mutex::new(vec![user]),
        }
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.google_id == google_id)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| &u.id == id)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), DomainError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn update_credentials(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.lock().unwrap();
        if let Some(u) = users.iter_mut().find(|u| u.id == user.id) {
            *u = user.clone();
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Workspaces
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct MockWorkspaceRepository {
    workspaces: Mutex<Vec<(UserId, Workspace)>>,
}

impl MockWorkspaceRepository {
    pub fn workspace_count(&self) -> usize {
        self.workspaces.lock().unwrap().len()
    }

    pub fn find(&self, user_id: &UserId, name: &str) -> Option<Workspace> {
        self.workspaces
            .lock()
            .unwrap()
            .iter()
            .find(|(owner, ws)| owner == user_id && ws.name == name)
            .map(|(_, ws)| ws.clone())
    }
}

#[async_trait]
impl WorkspaceRepository for MockWorkspaceRepository {
    async fn create(&self, user_id: &UserId, workspace: &Workspace) -> Result<(), DomainError> {
        let mut workspaces = self.workspaces.lock().unwrap();
        if workspaces
            .iter()
            .any(|(owner, ws)| owner == user_id && ws.name == workspace.name)
        {
            return Err(DomainError::duplicate_name("Workspace"));
        }
        workspaces.push((*user_id, workspace.clone()));
        Ok(())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Workspace>, DomainError> {
        Ok(self
            .workspaces
            .lock()
            .unwrap()
            .iter()
            .filter(|(owner, _)| owner == user_id)
            .map(|(_, ws)| ws.clone())
            .collect())
    }

    async fn find_by_name(
        &self,
        user_id: &UserId,
        name: &str,
    ) -> Result<Option<Workspace>, DomainError> {
        Ok(self.find(user_id, name))
    }

    async fn ensure(&self, user_id: &UserId, name: &str) -> Result<Workspace, DomainError> {
        if let Some(existing) = self.find(user_id, name) {
            return Ok(existing);
        }
        let workspace = Workspace::new(name, None)?;
        self.workspaces
            .lock()
            .unwrap()
            .push((*user_id, workspace.clone()));
        Ok(workspace)
    }

    async fn delete(&self, user_id: &UserId, id: &WorkspaceId) -> Result<bool, DomainError> {
        let mut workspaces = self.workspaces.lock().unwrap();
        let before = workspaces.len();
        workspaces.retain(|(owner, ws)| !(owner == user_id && &ws.id == id));
        Ok(workspaces.len() < before)
    }

    async fn upsert_list(
        &self,
        workspace_id: &WorkspaceId,
        name: &str,
    ) -> Result<List, DomainError> {
        let mut workspaces = self.workspaces.lock().unwrap();
        let (_, workspace) = workspaces
            .iter_mut()
            .find(|(_, ws)| &ws.id == workspace_id)
            .ok_or_else(|| DomainError::not_found("Workspace"))?;

        if let Some(existing) = workspace.find_list(name) {
            return Ok(existing.clone());
        }

        let list = List::new(name)?;
        workspace.lists.push(list.clone());
        Ok(list)
    }

    async fn remove_list(
        &self,
        workspace_id: &WorkspaceId,
        name: &str,
    ) -> Result<bool, DomainError> {
        let mut workspaces = self.workspaces.lock().unwrap();
        let Some((_, workspace)) = workspaces.iter_mut().find(|(_, ws)| &ws.id == workspace_id)
        else {
            return Ok(false);
        };

        let before = workspace.lists.len();
        workspace.lists.retain(|l| l.name != name);
        Ok(workspace.lists.len() < before)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Mail
// ════════════════════════════════════════════════════════════════════════════════

pub struct MockMailProvider {
    result: Result<Vec<EmailSummary>, MailError>,
    queries: Mutex<Vec<String>>,
}

impl MockMailProvider {
    pub fn with_emails(emails: Vec<EmailSummary>) -> Self {
        Self {
            result: Ok(emails),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: MailError) -> Self {
        Self {
            result: Err(error),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// The queries seen, in call order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailProvider for MockMailProvider {
    async fn search(
        &self,
        _refresh_token: &str,
        query: &MailQuery,
        _max_results: u32,
    ) -> Result<Vec<EmailSummary>, MailError> {
        self.queries.lock().unwrap().push(query.as_str().to_string());
        self.result.clone()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Transactions
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct MockTransactionRepository {
    transactions: Mutex<Vec<Transaction>>,
}

impl MockTransactionRepository {
    pub fn with_transaction(transaction: Transaction) -> Self {
        Self {
            transactions: Mutex::new(vec![transaction]),
        }
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.transactions.lock().unwrap().clone()
    }
}

#[async_trait]
impl TransactionRepository for MockTransactionRepository {
    async fn append(&self, transaction: &Transaction) -> Result<(), DomainError> {
        self.transactions.lock().unwrap().push(transaction.clone());
        Ok(())
    }

    async fn has_any(&self, user_id: &UserId) -> Result<bool, DomainError> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .any(|t| &t.user_id == user_id))
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Transaction>, DomainError> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|t| &t.user_id == user_id)
            .cloned()
            .collect())
    }
}
