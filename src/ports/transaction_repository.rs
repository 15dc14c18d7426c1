//! Transaction repository port.
//!
//! History is append-only; "has any transaction" is the paid gate.

use async_trait::async_trait;

use crate::domain::billing::Transaction;
use crate::domain::foundation::{DomainError, UserId};

/// Port for the append-only payment history.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Append a completed transaction.
    async fn append(&self, transaction: &Transaction) -> Result<(), DomainError>;

    /// Whether the user has at least one recorded transaction.
    async fn has_any(&self, user_id: &UserId) -> Result<bool, DomainError>;

    /// The user's transactions, newest first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Transaction>, DomainError>;
}
