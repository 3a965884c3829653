use chrono::{DateTime, Utc};
use folio_domain::{DocumentKind, DocumentStatus};
use serde::{Deserialize, Serialize};

/// Incoming payload for draft creation.
#[derive(Debug, Deserialize)]
pub struct CreateDocumentRequest {
    pub kind: Option<DocumentKind>,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// Incoming payload for replacing a draft body.
#[derive(Debug, Deserialize)]
pub struct EditDocumentBodyRequest {
    pub body: String,
}

/// Incoming payload for a status change.
#[derive(Debug, Deserialize)]
pub struct TransitionDocumentRequest {
    pub to: DocumentStatus,
    pub publisher_id: Option<String>,
    pub note: Option<String>,
}

/// Query parameters for document listing.
#[derive(Debug, Default, Deserialize)]
pub struct DocumentListParams {
    pub status: Option<DocumentStatus>,
    pub author_id: Option<String>,
    pub assigned_publisher_id: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// API representation of a document.
#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub id: String,
    pub kind: DocumentKind,
    pub title: String,
    pub body: String,
    pub status: DocumentStatus,
    pub author_id: String,
    pub assigned_publisher_id: Option<String>,
    pub paragraph_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub revision: u64,
}
