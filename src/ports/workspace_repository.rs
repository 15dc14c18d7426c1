//! Workspace repository port.
//!
//! Name uniqueness (workspace name per user, list name per workspace) is the
//! store's responsibility: implementations must reject duplicates atomically
//! rather than relying on a read-then-insert check.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId, WorkspaceId};
use crate::domain::workspace::{List, Workspace};

/// Port for persisting workspaces and their lists.
#[async_trait]
pub trait WorkspaceRepository: Send + Sync {
    /// Insert a new workspace for the user.
    ///
    /// Fails with `DuplicateName` when the user already has a workspace with
    /// that name.
    async fn create(&self, user_id: &UserId, workspace: &Workspace) -> Result<(), DomainError>;

    /// All workspaces of the user, lists embedded, in creation order.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Workspace>, DomainError>;

    /// One workspace by name, lists embedded.
    async fn find_by_name(
        &self,
        user_id: &UserId,
        name: &str,
    ) -> Result<Option<Workspace>, DomainError>;

    /// Create-if-absent by name; returns the existing or newly created
    /// workspace.
    async fn ensure(&self, user_id: &UserId, name: &str) -> Result<Workspace, DomainError>;

    /// Delete a workspace by id. Returns `false` when the user has no such
    /// workspace.
    async fn delete(&self, user_id: &UserId, id: &WorkspaceId) -> Result<bool, DomainError>;

    /// Insert the list if no list of that name exists in the workspace;
    /// returns the existing or newly created list either way.
    async fn upsert_list(
        &self,
        workspace_id: &WorkspaceId,
        name: &str,
    ) -> Result<List, DomainError>;

    /// Remove a list by name. Returns `false` when no such list exists.
    async fn remove_list(
        &self,
        workspace_id: &WorkspaceId,
        name: &str,
    ) -> Result<bool, DomainError>;
}
