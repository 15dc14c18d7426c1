//! PostgreSQL implementation of `TransactionRepository`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::billing::{PlanType, Transaction};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, TransactionId, UserId};
use crate::ports::TransactionRepository;

/// PostgreSQL-backed append-only payment history.
pub struct PostgresTransactionRepository {
    pool: PgPool,
}

impl PostgresTransactionRepository {
    /// Creates a repository over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a transaction.
#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: Uuid,
    user_id: Uuid,
    amount_cents: i64,
    status: String,
    plan: String,
    occurred_at: DateTime<Utc>,
    subscription_end: DateTime<Utc>,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = DomainError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        let plan = PlanType::parse(&row.plan).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid plan value: {}", row.plan),
            )
        })?;

        Ok(Transaction {
            id: TransactionId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            amount_cents: row.amount_cents,
            status: row.status,
            plan,
            occurred_at: Timestamp::from_datetime(row.occurred_at),
            subscription_end: Timestamp::from_datetime(row.subscription_end),
        })
    }
}

fn db_error(context: &str, err: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, err))
}

#[async_trait]
impl TransactionRepository for PostgresTransactionRepository {
    async fn append(&self, transaction: &Transaction) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO transactions (
                id, user_id, amount_cents, status, plan, occurred_at, subscription_end
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(transaction.id.as_uuid())
        .bind(transaction.user_id.as_uuid())
        .bind(transaction.amount_cents)
        .bind(&transaction.status)
        .bind(transaction.plan.to_string())
        .bind(transaction.occurred_at.as_datetime())
        .bind(transaction.subscription_end.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to append transaction", e))?;

        Ok(())
    }

    async fn has_any(&self, user_id: &UserId) -> Result<bool, DomainError> {
        let exists: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(SELECT 1 FROM transactions WHERE user_id = $1)
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to check payment history", e))?;

        Ok(exists.0)
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Transaction>, DomainError> {
        let rows: Vec<TransactionRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, amount_cents, status, plan, occurred_at, subscription_end
            FROM transactions
            WHERE user_id = $1
            ORDER BY occurred_at DESC
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load transactions", e))?;

        rows.into_iter().map(Transaction::try_from).collect()
    }
}
