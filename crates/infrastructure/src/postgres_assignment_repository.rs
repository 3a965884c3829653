use std::collections::BTreeSet;

use async_trait::async_trait;
use folio_application::AssignmentRepository;
use folio_core::{ActorId, AppError, AppResult};
use folio_domain::AssignmentRelation;
use sqlx::{FromRow, PgPool};

/// PostgreSQL-backed editor/publisher assignment repository.
#[derive(Clone)]
pub struct PostgresAssignmentRepository {
    pool: PgPool,
}

impl PostgresAssignmentRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AssignmentRow {
    editor_id: String,
    publisher_id: String,
}

#[async_trait]
impl AssignmentRepository for PostgresAssignmentRepository {
    async fn load_assignments(&self) -> AppResult<BTreeSet<AssignmentRelation>> {
        let rows = sqlx::query_as::<_, AssignmentRow>(
            r#"
            SELECT editor_id, publisher_id
            FROM publisher_assignments
            ORDER BY editor_id, publisher_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load assignments: {error}")))?;

        rows.into_iter()
            .map(|row| {
                AssignmentRelation::new(
                    ActorId::new(row.editor_id)?,
                    ActorId::new(row.publisher_id)?,
                )
            })
            .collect()
    }

    async fn save_assignments(&self, relations: &BTreeSet<AssignmentRelation>) -> AppResult<()> {
        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Internal(format!("failed to begin transaction: {error}"))
        })?;

        let editor_ids: Vec<String> = relations
            .iter()
            .map(|relation| relation.editor_id().to_string())
            .collect();
        let publisher_ids: Vec<String> = relations
            .iter()
            .map(|relation| relation.publisher_id().to_string())
            .collect();

        sqlx::query(
            r#"
            DELETE FROM publisher_assignments
            WHERE (editor_id, publisher_id) NOT IN (
                SELECT * FROM UNNEST($1::TEXT[], $2::TEXT[])
            )
            "#,
        )
        .bind(&editor_ids)
        .bind(&publisher_ids)
        .execute(&mut *transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to prune assignments: {error}")))?;

        sqlx::query(
            r#"
            INSERT INTO publisher_assignments (editor_id, publisher_id)
            SELECT * FROM UNNEST($1::TEXT[], $2::TEXT[])
            ON CONFLICT (editor_id, publisher_id) DO NOTHING
            "#,
        )
        .bind(&editor_ids)
        .bind(&publisher_ids)
        .execute(&mut *transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to insert assignments: {error}")))?;

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit assignments: {error}"))
        })?;

        Ok(())
    }
}
