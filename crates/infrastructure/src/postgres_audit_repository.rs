use async_trait::async_trait;
use folio_application::{AuditEvent, AuditRepository};
use folio_core::{AppError, AppResult};
use folio_domain::DocumentStatus;
use sqlx::PgPool;

/// Append-only audit log stored in `audit_log_entries`.
///
/// Document events carry the status before and after the change, so a
/// document's lifecycle can be replayed from the log alone.
#[derive(Clone)]
pub struct PostgresAuditRepository {
    pool: PgPool,
}

impl PostgresAuditRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditRepository for PostgresAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        let action = event.action.as_str();

        sqlx::query(
            r#"
            INSERT INTO audit_log_entries (
                subject, action, resource_type, resource_id, from_status, to_status, detail
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(event.subject.as_str())
        .bind(action)
        .bind(event.resource_type.as_str())
        .bind(event.resource_id.as_str())
        .bind(event.from_status.as_ref().map(DocumentStatus::as_str))
        .bind(event.to_status.as_ref().map(DocumentStatus::as_str))
        .bind(event.detail.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to record audit action '{action}' for {} '{}': {error}",
                event.resource_type, event.resource_id
            ))
        })?;

        Ok(())
    }
}
