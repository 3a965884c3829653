use async_trait::async_trait;
use folio_core::AppResult;
use folio_domain::{AuditAction, DocumentStatus};

/// Immutable audit event payload emitted by application services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Actor that performed the action.
    pub subject: String,
    /// Stable audit action identifier.
    pub action: AuditAction,
    /// Resource type label.
    pub resource_type: String,
    /// Resource identifier.
    pub resource_id: String,
    /// Document status before the action, when a document was already stored.
    pub from_status: Option<DocumentStatus>,
    /// Document status after the action; `None` for assignment events.
    pub to_status: Option<DocumentStatus>,
    /// Optional audit detail payload.
    pub detail: Option<String>,
}

/// Port for persisting append-only audit events.
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Persists one audit event.
    async fn append_event(&self, event: AuditEvent) -> AppResult<()>;
}
