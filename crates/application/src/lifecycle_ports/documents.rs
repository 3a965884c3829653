use async_trait::async_trait;
use folio_core::{ActorId, AppResult};
use folio_domain::{Document, DocumentId, DocumentKind, DocumentStatus};

/// Input payload for creating a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDocumentInput {
    /// Document kind.
    pub kind: DocumentKind,
    /// Display title.
    pub title: String,
    /// Initial block-markup body.
    pub body: String,
}

/// Input payload for a status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionInput {
    /// Requested status.
    pub target: DocumentStatus,
    /// Publisher chosen when submitting for review.
    pub publisher_id: Option<ActorId>,
    /// Optional reviewer note recorded with the audit event.
    pub note: Option<String>,
}

/// Query inputs for document listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentListQuery {
    /// Restricts results to one status.
    pub status: Option<DocumentStatus>,
    /// Restricts results to one author.
    pub author_id: Option<ActorId>,
    /// Restricts results to documents awaiting one publisher.
    pub assigned_publisher_id: Option<ActorId>,
    /// Maximum rows returned.
    pub limit: usize,
    /// Number of rows skipped for offset pagination.
    pub offset: usize,
}

impl DocumentListQuery {
    /// Returns whether `document` satisfies every filter.
    #[must_use]
    pub fn matches(&self, document: &Document) -> bool {
        self.status.is_none_or(|status| document.status() == status)
            && self
                .author_id
                .as_ref()
                .is_none_or(|author_id| document.author_id() == author_id)
            && self
                .assigned_publisher_id
                .as_ref()
                .is_none_or(|publisher_id| document.assigned_publisher_id() == Some(publisher_id))
    }
}

/// Persistence port for documents.
///
/// Implementations enforce optimistic concurrency on [`Document::revision`].
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Stores a new document.
    async fn create_document(&self, document: Document) -> AppResult<()>;

    /// Finds a document by id.
    async fn find_document(&self, document_id: DocumentId) -> AppResult<Option<Document>>;

    /// Replaces a stored document if its revision still equals
    /// `expected_revision`, failing with a conflict otherwise.
    async fn save_document(&self, document: Document, expected_revision: u64) -> AppResult<()>;

    /// Lists documents matching the query, most recently updated first.
    async fn list_documents(&self, query: DocumentListQuery) -> AppResult<Vec<Document>>;
}
