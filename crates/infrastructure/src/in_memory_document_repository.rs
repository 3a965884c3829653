use std::collections::HashMap;

use async_trait::async_trait;
use folio_application::{DocumentListQuery, DocumentRepository};
use folio_core::{AppError, AppResult};
use folio_domain::{Document, DocumentId};
use tokio::sync::RwLock;

/// In-memory document repository with revision-checked writes.
#[derive(Debug, Default)]
pub struct InMemoryDocumentRepository {
    documents: RwLock<HashMap<DocumentId, Document>>,
}

impl InMemoryDocumentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn create_document(&self, document: Document) -> AppResult<()> {
        let mut documents = self.documents.write().await;

        if documents.contains_key(&document.id()) {
            return Err(AppError::Conflict(format!(
                "document '{}' already exists",
                document.id()
            )));
        }

        documents.insert(document.id(), document);
        Ok(())
    }

    async fn find_document(&self, document_id: DocumentId) -> AppResult<Option<Document>> {
        Ok(self.documents.read().await.get(&document_id).cloned())
    }

    async fn save_document(&self, document: Document, expected_revision: u64) -> AppResult<()> {
        let mut documents = self.documents.write().await;
        let stored = documents.get(&document.id()).ok_or_else(|| {
            AppError::NotFound(format!("document '{}' does not exist", document.id()))
        })?;

        if stored.revision() != expected_revision {
            return Err(AppError::Conflict(format!(
                "document '{}' was modified concurrently; expected revision {expected_revision}, found {}",
                document.id(),
                stored.revision()
            )));
        }

        documents.insert(document.id(), document);
        Ok(())
    }

    async fn list_documents(&self, query: DocumentListQuery) -> AppResult<Vec<Document>> {
        let documents = self.documents.read().await;

        let mut values: Vec<Document> = documents
            .values()
            .filter(|document| query.matches(document))
            .cloned()
            .collect();
        values.sort_by(|left, right| {
            right
                .updated_at()
                .cmp(&left.updated_at())
                .then_with(|| left.id().cmp(&right.id()))
        });

        Ok(values
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .collect())
    }
}
