use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use folio_application::{DocumentListQuery, DocumentRepository};
use folio_core::{ActorId, AppError, AppResult};
use folio_domain::{Document, DocumentId, DocumentKind, DocumentParts, DocumentStatus};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

const DOCUMENT_COLUMNS: &str = "id, kind, title, body, status, author_id, assigned_publisher_id, \
     created_at, updated_at, published_at, revision";

/// PostgreSQL-backed document repository with revision-checked writes.
#[derive(Clone)]
pub struct PostgresDocumentRepository {
    pool: PgPool,
}

impl PostgresDocumentRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: Uuid,
    kind: String,
    title: String,
    body: String,
    status: String,
    author_id: String,
    assigned_publisher_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    published_at: Option<DateTime<Utc>>,
    revision: i64,
}

impl TryFrom<DocumentRow> for Document {
    type Error = AppError;

    fn try_from(row: DocumentRow) -> Result<Self, Self::Error> {
        let revision = u64::try_from(row.revision).map_err(|error| {
            AppError::Internal(format!(
                "document '{}' has invalid revision {}: {error}",
                row.id, row.revision
            ))
        })?;

        Document::from_parts(DocumentParts {
            id: DocumentId::from_uuid(row.id),
            kind: DocumentKind::from_str(row.kind.as_str())?,
            title: row.title,
            body: row.body,
            status: DocumentStatus::from_str(row.status.as_str())?,
            author_id: ActorId::new(row.author_id)?,
            assigned_publisher_id: row.assigned_publisher_id.map(ActorId::new).transpose()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            published_at: row.published_at,
            revision,
        })
    }
}

fn revision_to_db(revision: u64) -> AppResult<i64> {
    i64::try_from(revision)
        .map_err(|error| AppError::Validation(format!("invalid document revision: {error}")))
}

#[async_trait]
impl DocumentRepository for PostgresDocumentRepository {
    async fn create_document(&self, document: Document) -> AppResult<()> {
        let parts = document.into_parts();
        let revision = revision_to_db(parts.revision)?;

        let result = sqlx::query(
            r#"
            INSERT INTO documents (
                id, kind, title, body, status, author_id, assigned_publisher_id,
                created_at, updated_at, published_at, revision
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(parts.id.as_uuid())
        .bind(parts.kind.as_str())
        .bind(parts.title.as_str())
        .bind(parts.body.as_str())
        .bind(parts.status.as_str())
        .bind(parts.author_id.as_str())
        .bind(parts.assigned_publisher_id.as_ref().map(ActorId::as_str))
        .bind(parts.created_at)
        .bind(parts.updated_at)
        .bind(parts.published_at)
        .bind(revision)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to create document '{}': {error}", parts.id))
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::Conflict(format!(
                "document '{}' already exists",
                parts.id
            )));
        }

        Ok(())
    }

    async fn find_document(&self, document_id: DocumentId) -> AppResult<Option<Document>> {
        let row = sqlx::query_as::<_, DocumentRow>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = $1"
        ))
        .bind(document_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to load document '{document_id}': {error}"))
        })?;

        row.map(Document::try_from).transpose()
    }

    async fn save_document(&self, document: Document, expected_revision: u64) -> AppResult<()> {
        let parts = document.into_parts();
        let revision = revision_to_db(parts.revision)?;
        let expected = revision_to_db(expected_revision)?;

        let result = sqlx::query(
            r#"
            UPDATE documents
            SET title = $2,
                body = $3,
                status = $4,
                assigned_publisher_id = $5,
                updated_at = $6,
                published_at = $7,
                revision = $8
            WHERE id = $1 AND revision = $9
            "#,
        )
        .bind(parts.id.as_uuid())
        .bind(parts.title.as_str())
        .bind(parts.body.as_str())
        .bind(parts.status.as_str())
        .bind(parts.assigned_publisher_id.as_ref().map(ActorId::as_str))
        .bind(parts.updated_at)
        .bind(parts.published_at)
        .bind(revision)
        .bind(expected)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to save document '{}': {error}", parts.id))
        })?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM documents WHERE id = $1)",
        )
        .bind(parts.id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to check document '{}': {error}", parts.id))
        })?;

        if exists {
            Err(AppError::Conflict(format!(
                "document '{}' was modified concurrently; expected revision {expected_revision}",
                parts.id
            )))
        } else {
            Err(AppError::NotFound(format!(
                "document '{}' does not exist",
                parts.id
            )))
        }
    }

    async fn list_documents(&self, query: DocumentListQuery) -> AppResult<Vec<Document>> {
        let limit = i64::try_from(query.limit).map_err(|error| {
            AppError::Validation(format!("invalid document query limit: {error}"))
        })?;
        let offset = i64::try_from(query.offset).map_err(|error| {
            AppError::Validation(format!("invalid document query offset: {error}"))
        })?;

        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new(format!("SELECT {DOCUMENT_COLUMNS} FROM documents WHERE TRUE"));

        if let Some(status) = query.status {
            builder.push(" AND status = ");
            builder.push_bind(status.as_str());
        }
        if let Some(author_id) = query.author_id {
            builder.push(" AND author_id = ");
            builder.push_bind(String::from(author_id.as_str()));
        }
        if let Some(publisher_id) = query.assigned_publisher_id {
            builder.push(" AND assigned_publisher_id = ");
            builder.push_bind(String::from(publisher_id.as_str()));
        }

        builder.push(" ORDER BY updated_at DESC LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(offset);

        let rows = builder
            .build_query_as::<DocumentRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to list documents: {error}")))?;

        rows.into_iter().map(Document::try_from).collect()
    }
}
