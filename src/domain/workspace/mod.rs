//! Workspace and list records.
//!
//! A workspace groups lists; a list's name doubles as the match key for mail
//! queries. Emails are a transient view over the mail provider and are never
//! embedded in these records.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ListId, Timestamp, ValidationError, WorkspaceId};

/// A named workspace owned by exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub name: String,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub lists: Vec<List>,
}

impl Workspace {
    /// Creates a new workspace with an empty list collection.
    pub fn new(name: impl Into<String>, image_url: Option<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }

        Ok(Self {
            id: WorkspaceId::new(),
            name: name.to_string(),
            image_url,
            created_at: Timestamp::now(),
            lists: Vec::new(),
        })
    }

    /// Finds a list by name.
    pub fn find_list(&self, name: &str) -> Option<&List> {
        self.lists.iter().find(|l| l.name == name)
    }
}

/// A named list inside a workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct List {
    pub id: ListId,
    pub name: String,
    pub created_at: Timestamp,
}

impl List {
    /// Creates a new list.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }

        Ok(Self {
            id: ListId::new(),
            name: name.to_string(),
            created_at: Timestamp::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workspace_starts_with_no_lists() {
        let ws = Workspace::new("Newsletters", None).unwrap();
        assert_eq!(ws.name, "Newsletters");
        assert!(ws.lists.is_empty());
    }

    #[test]
    fn workspace_name_is_trimmed() {
        let ws = Workspace::new("  Promotions  ", None).unwrap();
        assert_eq!(ws.name, "Promotions");
    }

    #[test]
    fn blank_workspace_name_rejected() {
        assert!(Workspace::new("   ", None).is_err());
    }

    #[test]
    fn blank_list_name_rejected() {
        assert!(List::new("").is_err());
    }

    #[test]
    fn find_list_by_name() {
        let mut ws = Workspace::new("Work", None).unwrap();
        ws.lists.push(List::new("GitHub").unwrap());

        assert!(ws.find_list("GitHub").is_some());
        assert!(ws.find_list("GitLab").is_none());
    }
}
