//! User repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;

/// Port for persisting user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by provider-issued identifier.
    async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by internal id.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Persist a newly created user.
    async fn create(&self, user: &User) -> Result<(), DomainError>;

    /// Persist refreshed profile/credential fields of an existing user.
    async fn update_credentials(&self, user: &User) -> Result<(), DomainError>;
}
