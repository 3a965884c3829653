use folio_application::{CreateDocumentInput, DocumentListQuery, TransitionInput};
use folio_core::{ActorId, AppError};
use folio_domain::{Document, DocumentKind, paragraph_count};

use super::types::{
    CreateDocumentRequest, DocumentListParams, DocumentResponse, TransitionDocumentRequest,
};

impl From<Document> for DocumentResponse {
    fn from(value: Document) -> Self {
        Self {
            id: value.id().to_string(),
            kind: value.kind(),
            title: value.title().to_owned(),
            paragraph_count: paragraph_count(value.body()),
            body: value.body().to_owned(),
            status: value.status(),
            author_id: value.author_id().to_string(),
            assigned_publisher_id: value.assigned_publisher_id().map(ToString::to_string),
            created_at: value.created_at(),
            updated_at: value.updated_at(),
            published_at: value.published_at(),
            revision: value.revision(),
        }
    }
}

impl From<CreateDocumentRequest> for CreateDocumentInput {
    fn from(value: CreateDocumentRequest) -> Self {
        Self {
            kind: value.kind.unwrap_or(DocumentKind::Content),
            title: value.title,
            body: value.body,
        }
    }
}

impl TryFrom<TransitionDocumentRequest> for TransitionInput {
    type Error = AppError;

    fn try_from(value: TransitionDocumentRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            target: value.to,
            publisher_id: value.publisher_id.map(ActorId::new).transpose()?,
            note: value.note,
        })
    }
}

impl TryFrom<DocumentListParams> for DocumentListQuery {
    type Error = AppError;

    fn try_from(value: DocumentListParams) -> Result<Self, Self::Error> {
        Ok(Self {
            status: value.status,
            author_id: value.author_id.map(ActorId::new).transpose()?,
            assigned_publisher_id: value.assigned_publisher_id.map(ActorId::new).transpose()?,
            limit: value.limit.unwrap_or(50),
            offset: value.offset.unwrap_or(0),
        })
    }
}
