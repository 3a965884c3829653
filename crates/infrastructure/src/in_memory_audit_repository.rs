//! Development audit sink. Keeps events in memory and mirrors them to tracing output.

use async_trait::async_trait;
use folio_application::{AuditEvent, AuditRepository};
use folio_core::AppResult;
use tokio::sync::RwLock;
use tracing::info;

/// Audit repository that retains events for the process lifetime.
#[derive(Debug, Default)]
pub struct InMemoryAuditRepository {
    events: RwLock<Vec<AuditEvent>>,
}

impl InMemoryAuditRepository {
    /// Creates an empty audit sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) async fn events(&self) -> Vec<AuditEvent> {
        self.events.read().await.clone()
    }
}

#[async_trait]
impl AuditRepository for InMemoryAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        info!(
            subject = %event.subject,
            action = event.action.as_str(),
            resource_type = %event.resource_type,
            resource_id = %event.resource_id,
            detail = event.detail.as_deref().unwrap_or(""),
            "audit event recorded"
        );

        self.events.write().await.push(event);
        Ok(())
    }
}
