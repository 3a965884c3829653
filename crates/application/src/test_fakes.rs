use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use folio_core::{ActorId, AppError, AppResult};
use folio_domain::{Actor, AssignmentRelation, Document, DocumentId, Role};
use tokio::sync::Mutex;

use crate::{
    AssignmentRepository, AssignmentService, AuditEvent, AuditRepository, DocumentListQuery,
    DocumentRepository,
};

#[derive(Default)]
pub(crate) struct FakeAuditRepository {
    pub(crate) events: Mutex<Vec<AuditEvent>>,
}

#[async_trait]
impl AuditRepository for FakeAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.events.lock().await.push(event);
        Ok(())
    }
}

pub(crate) struct FailingAuditRepository;

#[async_trait]
impl AuditRepository for FailingAuditRepository {
    async fn append_event(&self, _event: AuditEvent) -> AppResult<()> {
        Err(AppError::Internal("audit store offline".to_owned()))
    }
}

#[derive(Default)]
pub(crate) struct FakeAssignmentRepository {
    pub(crate) relations: Mutex<BTreeSet<AssignmentRelation>>,
    pub(crate) fail_saves: bool,
}

#[async_trait]
impl AssignmentRepository for FakeAssignmentRepository {
    async fn load_assignments(&self) -> AppResult<BTreeSet<AssignmentRelation>> {
        Ok(self.relations.lock().await.clone())
    }

    async fn save_assignments(&self, relations: &BTreeSet<AssignmentRelation>) -> AppResult<()> {
        if self.fail_saves {
            return Err(AppError::Internal("assignment store offline".to_owned()));
        }

        *self.relations.lock().await = relations.clone();
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeDocumentRepository {
    pub(crate) documents: Mutex<HashMap<DocumentId, Document>>,
}

#[async_trait]
impl DocumentRepository for FakeDocumentRepository {
    async fn create_document(&self, document: Document) -> AppResult<()> {
        self.documents.lock().await.insert(document.id(), document);
        Ok(())
    }

    async fn find_document(&self, document_id: DocumentId) -> AppResult<Option<Document>> {
        Ok(self.documents.lock().await.get(&document_id).cloned())
    }

    async fn save_document(&self, document: Document, expected_revision: u64) -> AppResult<()> {
        let mut documents = self.documents.lock().await;
        let stored_revision = documents
            .get(&document.id())
            .map(Document::revision)
            .ok_or_else(|| AppError::NotFound(format!("document '{}'", document.id())))?;

        if stored_revision != expected_revision {
            return Err(AppError::Conflict(format!(
                "document '{}' changed concurrently",
                document.id()
            )));
        }

        documents.insert(document.id(), document);
        Ok(())
    }

    async fn list_documents(&self, query: DocumentListQuery) -> AppResult<Vec<Document>> {
        Ok(self
            .documents
            .lock()
            .await
            .values()
            .filter(|document| query.matches(document))
            .cloned()
            .collect())
    }
}

pub(crate) fn actor_id(value: &str) -> ActorId {
    ActorId::new(value).unwrap_or_else(|_| unreachable!())
}

pub(crate) fn actor(value: &str, role: Role) -> Actor {
    Actor::new(actor_id(value), role)
}

pub(crate) async fn assignment_service_with(
    pairs: &[(&str, &str)],
    audit_repository: Arc<dyn AuditRepository>,
) -> AssignmentService {
    let relations = pairs
        .iter()
        .map(|(editor, publisher)| {
            AssignmentRelation::new(actor_id(editor), actor_id(publisher))
                .unwrap_or_else(|_| unreachable!())
        })
        .collect();
    let repository = FakeAssignmentRepository {
        relations: Mutex::new(relations),
        fail_saves: false,
    };

    AssignmentService::load(Arc::new(repository), audit_repository)
        .await
        .unwrap_or_else(|_| unreachable!())
}
