//! Mailbox read use cases.

mod get_inbox;
mod get_workspace_emails;

pub use get_inbox::{GetInboxHandler, GetInboxQuery};
pub use get_workspace_emails::{GetWorkspaceEmailsHandler, GetWorkspaceEmailsQuery};
