//! PostgreSQL adapters for the repository ports.

mod transaction_repository;
mod user_repository;
mod workspace_repository;

pub use transaction_repository::PostgresTransactionRepository;
pub use user_repository::PostgresUserRepository;
pub use workspace_repository::PostgresWorkspaceRepository;
