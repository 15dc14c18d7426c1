//! PostgreSQL implementation of `WorkspaceRepository`.
//!
//! Name uniqueness lives in the schema (`workspaces_user_id_name_key`,
//! `lists_workspace_id_name_key`); the create-if-absent and upsert paths use
//! `ON CONFLICT DO NOTHING` followed by a read, so concurrent callers converge
//! on the same row instead of racing a check-then-insert.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, ListId, Timestamp, UserId, WorkspaceId};
use crate::domain::workspace::{List, Workspace};
use crate::ports::WorkspaceRepository;

/// PostgreSQL-backed workspace store.
pub struct PostgresWorkspaceRepository {
    pool: PgPool,
}

impl PostgresWorkspaceRepository {
    /// Creates a repository over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn lists_for_workspaces(
        &self,
        workspace_ids: &[Uuid],
    ) -> Result<Vec<(Uuid, List)>, DomainError> {
        let rows: Vec<ListRow> = sqlx::query_as(
            r#"
            SELECT id, workspace_id, name, created_at
            FROM lists
            WHERE workspace_id = ANY($1)
            ORDER BY created_at
            "#,
        )
        .bind(workspace_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load lists", e))?;

        Ok(rows
            .into_iter()
            .map(|row| (row.workspace_id, row.into_list()))
            .collect())
    }
}

/// Database row representation of a workspace.
#[derive(Debug, sqlx::FromRow)]
struct WorkspaceRow {
    id: Uuid,
    name: String,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl WorkspaceRow {
    fn into_workspace(self, lists: Vec<List>) -> Workspace {
        Workspace {
            id: WorkspaceId::from_uuid(self.id),
            name: self.name,
            image_url: self.image_url,
            created_at: Timestamp::from_datetime(self.created_at),
            lists,
        }
    }
}

/// Database row representation of a list.
#[derive(Debug, sqlx::FromRow)]
struct ListRow {
    id: Uuid,
    workspace_id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
}

impl ListRow {
    fn into_list(self) -> List {
        List {
            id: ListId::from_uuid(self.id),
            name: self.name,
            created_at: Timestamp::from_datetime(self.created_at),
        }
    }
}

fn db_error(context: &str, err: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, err))
}

#[async_trait]
impl WorkspaceRepository for PostgresWorkspaceRepository {
    async fn create(&self, user_id: &UserId, workspace: &Workspace) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO workspaces (id, user_id, name, image_url, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(workspace.id.as_uuid())
        .bind(user_id.as_uuid())
        .bind(&workspace.name)
        .bind(&workspace.image_url)
        .bind(workspace.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("workspaces_user_id_name_key") {
                    return DomainError::duplicate_name("Workspace");
                }
            }
            db_error("Failed to create workspace", e)
        })?;

        Ok(())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Workspace>, DomainError> {
        let rows: Vec<WorkspaceRow> = sqlx::query_as(
            r#"
            SELECT id, name, image_url, created_at
            FROM workspaces
            WHERE user_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load workspaces", e))?;

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut by_workspace: std::collections::HashMap<Uuid, Vec<List>> =
            std::collections::HashMap::new();
        for (ws_id, list) in self.lists_for_workspaces(&ids).await? {
            by_workspace.entry(ws_id).or_default().push(list);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let lists = by_workspace.remove(&row.id).unwrap_or_default();
                row.into_workspace(lists)
            })
            .collect())
    }

    async fn find_by_name(
        &self,
        user_id: &UserId,
        name: &str,
    ) -> Result<Option<Workspace>, DomainError> {
        let row: Option<WorkspaceRow> = sqlx::query_as(
            r#"
            SELECT id, name, image_url, created_at
            FROM workspaces
            WHERE user_id = $1 AND name = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load workspace", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let lists = self
            .lists_for_workspaces(&[row.id])
            .await?
            .into_iter()
            .map(|(_, list)| list)
            .collect();

        Ok(Some(row.into_workspace(lists)))
    }

    async fn ensure(&self, user_id: &UserId, name: &str) -> Result<Workspace, DomainError> {
        let candidate = Workspace::new(name, None)?;

        sqlx::query(
            r#"
            INSERT INTO workspaces (id, user_id, name, image_url, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT ON CONSTRAINT workspaces_user_id_name_key DO NOTHING
            "#,
        )
        .bind(candidate.id.as_uuid())
        .bind(user_id.as_uuid())
        .bind(&candidate.name)
        .bind(&candidate.image_url)
        .bind(candidate.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to ensure workspace", e))?;

        self.find_by_name(user_id, &candidate.name)
            .await?
            .ok_or_else(|| DomainError::not_found("Workspace"))
    }

    async fn delete(&self, user_id: &UserId, id: &WorkspaceId) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM workspaces
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to delete workspace", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn upsert_list(
        &self,
        workspace_id: &WorkspaceId,
        name: &str,
    ) -> Result<List, DomainError> {
        let candidate = List::new(name)?;

        sqlx::query(
            r#"
            INSERT INTO lists (id, workspace_id, name, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT ON CONSTRAINT lists_workspace_id_name_key DO NOTHING
            "#,
        )
        .bind(candidate.id.as_uuid())
        .bind(workspace_id.as_uuid())
        .bind(&candidate.name)
        .bind(candidate.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to upsert list", e))?;

        let row: ListRow = sqlx::query_as(
            r#"
            SELECT id, workspace_id, name, created_at
            FROM lists
            WHERE workspace_id = $1 AND name = $2
            "#,
        )
        .bind(workspace_id.as_uuid())
        .bind(&candidate.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load upserted list", e))?;

        Ok(row.into_list())
    }

    async fn remove_list(
        &self,
        workspace_id: &WorkspaceId,
        name: &str,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM lists
            WHERE workspace_id = $1 AND name = $2
            "#,
        )
        .bind(workspace_id.as_uuid())
        .bind(name)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to delete list", e))?;

        Ok(result.rows_affected() > 0)
    }
}
