//! Document entity and its status values.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use folio_core::{ActorId, AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Creates a new random document identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a document identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for DocumentId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for DocumentId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|error| AppError::Validation(format!("invalid document id '{value}': {error}")))
    }
}

/// Kind of managed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Editorial content item.
    Content,
    /// Governance policy.
    Policy,
}

impl DocumentKind {
    /// Returns a stable storage value for this kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Policy => "policy",
        }
    }
}

impl FromStr for DocumentKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "content" => Ok(Self::Content),
            "policy" => Ok(Self::Policy),
            _ => Err(AppError::Validation(format!(
                "unknown document kind '{value}'"
            ))),
        }
    }
}

/// Lifecycle status of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentStatus {
    /// Editable by its author.
    Draft,
    /// Awaiting review by an assigned publisher.
    UnderReview,
    /// Visible to readers.
    Published,
}

impl DocumentStatus {
    /// Returns a stable storage value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::UnderReview => "under-review",
            Self::Published => "published",
        }
    }
}

impl Display for DocumentStatus {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "draft" => Ok(Self::Draft),
            "under-review" => Ok(Self::UnderReview),
            "published" => Ok(Self::Published),
            _ => Err(AppError::Validation(format!(
                "unknown document status '{value}'"
            ))),
        }
    }
}

/// Field values used to rehydrate a stored document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentParts {
    /// Stable identifier.
    pub id: DocumentId,
    /// Document kind.
    pub kind: DocumentKind,
    /// Display title.
    pub title: String,
    /// Block-markup body.
    pub body: String,
    /// Current status.
    pub status: DocumentStatus,
    /// Owning editor.
    pub author_id: ActorId,
    /// Publisher chosen at submission time.
    pub assigned_publisher_id: Option<ActorId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// First publication timestamp.
    pub published_at: Option<DateTime<Utc>>,
    /// Optimistic concurrency token.
    pub revision: u64,
}

/// Content item or policy governed by the lifecycle state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    id: DocumentId,
    kind: DocumentKind,
    title: NonEmptyString,
    body: String,
    status: DocumentStatus,
    author_id: ActorId,
    assigned_publisher_id: Option<ActorId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    published_at: Option<DateTime<Utc>>,
    revision: u64,
}

impl Document {
    /// Creates a new draft owned by `author_id`.
    pub fn new_draft(
        kind: DocumentKind,
        title: impl Into<String>,
        body: impl Into<String>,
        author_id: ActorId,
        created_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        Ok(Self {
            id: DocumentId::new(),
            kind,
            title: NonEmptyString::new(title)?,
            body: body.into(),
            status: DocumentStatus::Draft,
            author_id,
            assigned_publisher_id: None,
            created_at,
            updated_at: created_at,
            published_at: None,
            revision: 0,
        })
    }

    /// Rehydrates a stored document, validating cross-field invariants.
    pub fn from_parts(parts: DocumentParts) -> AppResult<Self> {
        if parts.status == DocumentStatus::Published && parts.published_at.is_none() {
            return Err(AppError::Validation(format!(
                "published document '{}' is missing published_at",
                parts.id
            )));
        }

        if parts.status == DocumentStatus::UnderReview && parts.assigned_publisher_id.is_none() {
            return Err(AppError::Validation(format!(
                "document '{}' under review has no assigned publisher",
                parts.id
            )));
        }

        if parts.updated_at < parts.created_at {
            return Err(AppError::Validation(format!(
                "document '{}' was updated before it was created",
                parts.id
            )));
        }

        Ok(Self {
            id: parts.id,
            kind: parts.kind,
            title: NonEmptyString::new(parts.title)?,
            body: parts.body,
            status: parts.status,
            author_id: parts.author_id,
            assigned_publisher_id: parts.assigned_publisher_id,
            created_at: parts.created_at,
            updated_at: parts.updated_at,
            published_at: parts.published_at,
            revision: parts.revision,
        })
    }

    /// Returns the document identifier.
    #[must_use]
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// Returns the document kind.
    #[must_use]
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Returns the serialized block-markup body.
    #[must_use]
    pub fn body(&self) -> &str {
        self.body.as_str()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub fn status(&self) -> DocumentStatus {
        self.status
    }

    /// Returns the owning editor.
    #[must_use]
    pub fn author_id(&self) -> &ActorId {
        &self.author_id
    }

    /// Returns the publisher chosen for review, if any.
    #[must_use]
    pub fn assigned_publisher_id(&self) -> Option<&ActorId> {
        self.assigned_publisher_id.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last mutation timestamp.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the first publication timestamp.
    #[must_use]
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }

    /// Returns the optimistic concurrency token.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Converts the document back into its stored field values.
    #[must_use]
    pub fn into_parts(self) -> DocumentParts {
        DocumentParts {
            id: self.id,
            kind: self.kind,
            title: self.title.into(),
            body: self.body,
            status: self.status,
            author_id: self.author_id,
            assigned_publisher_id: self.assigned_publisher_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            published_at: self.published_at,
            revision: self.revision,
        }
    }

    pub(crate) fn set_status(&mut self, status: DocumentStatus) {
        self.status = status;
    }

    pub(crate) fn set_assigned_publisher(&mut self, publisher_id: Option<ActorId>) {
        self.assigned_publisher_id = publisher_id;
    }

    pub(crate) fn set_body(&mut self, body: String) {
        self.body = body;
    }

    pub(crate) fn mark_published(&mut self, at: DateTime<Utc>) {
        if self.published_at.is_none() {
            self.published_at = Some(at);
        }
    }

    pub(crate) fn touch(&mut self, at: DateTime<Utc>) {
        // Clock skew must never move updated_at backwards.
        self.updated_at = at.max(self.updated_at);
        self.revision = self.revision.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::{Duration, Utc};
    use folio_core::ActorId;

    use super::{Document, DocumentKind, DocumentStatus};

    fn author() -> ActorId {
        ActorId::new("ed1").unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn new_draft_starts_unpublished() {
        let now = Utc::now();
        let document = Document::new_draft(DocumentKind::Policy, "Leave", "", author(), now)
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(document.status(), DocumentStatus::Draft);
        assert_eq!(document.created_at(), document.updated_at());
        assert!(document.published_at().is_none());
        assert!(document.assigned_publisher_id().is_none());
        assert_eq!(document.revision(), 0);
    }

    #[test]
    fn blank_title_is_rejected() {
        let result = Document::new_draft(DocumentKind::Content, "  ", "", author(), Utc::now());
        assert!(result.is_err());
    }

    #[test]
    fn status_uses_kebab_case_literals() {
        assert_eq!(DocumentStatus::UnderReview.as_str(), "under-review");
        let encoded = serde_json::to_string(&DocumentStatus::UnderReview).unwrap_or_default();
        assert_eq!(encoded, "\"under-review\"");
        assert!(matches!(
            DocumentStatus::from_str("under-review"),
            Ok(DocumentStatus::UnderReview)
        ));
        assert!(DocumentStatus::from_str("archived").is_err());
    }

    #[test]
    fn from_parts_rejects_published_without_timestamp() {
        let now = Utc::now();
        let mut parts = Document::new_draft(DocumentKind::Content, "News", "", author(), now)
            .unwrap_or_else(|_| unreachable!())
            .into_parts();
        parts.status = DocumentStatus::Published;

        assert!(Document::from_parts(parts.clone()).is_err());

        parts.published_at = Some(now);
        assert!(Document::from_parts(parts).is_ok());
    }

    #[test]
    fn from_parts_rejects_inverted_timestamps() {
        let now = Utc::now();
        let mut parts = Document::new_draft(DocumentKind::Content, "News", "", author(), now)
            .unwrap_or_else(|_| unreachable!())
            .into_parts();
        parts.updated_at = now - Duration::seconds(5);

        assert!(Document::from_parts(parts).is_err());
    }

    #[test]
    fn touch_never_moves_updated_at_backwards() {
        let now = Utc::now();
        let mut document = Document::new_draft(DocumentKind::Content, "News", "", author(), now)
            .unwrap_or_else(|_| unreachable!());

        document.touch(now - Duration::seconds(30));
        assert_eq!(document.updated_at(), now);
        assert_eq!(document.revision(), 1);
    }
}
