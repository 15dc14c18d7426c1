//! Workspace and list use cases.

mod create_list;
mod create_workspace;
mod delete_workspace;
mod get_workspace;
mod list_workspaces;
mod remove_list;

pub use create_list::{CreateListCommand, CreateListHandler, CreateListResult};
pub use create_workspace::{CreateWorkspaceCommand, CreateWorkspaceHandler};
pub use delete_workspace::{DeleteWorkspaceCommand, DeleteWorkspaceHandler};
pub use get_workspace::{GetWorkspaceHandler, GetWorkspaceQuery};
pub use list_workspaces::{ListWorkspacesHandler, ListWorkspacesQuery};
pub use remove_list::{RemoveListCommand, RemoveListHandler};
