use crate::LifecycleTransition;

/// Stable audit actions emitted by application use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuditAction {
    /// Emitted when a document draft is created.
    DocumentCreated,
    /// Emitted when a draft is submitted for review.
    DocumentSubmitted,
    /// Emitted when a reviewer sends a document back to draft.
    DocumentReturnedToDraft,
    /// Emitted when a document is published.
    DocumentPublished,
    /// Emitted when an administrator withdraws a published document.
    DocumentUnpublished,
    /// Emitted when a draft body is edited directly.
    DocumentEdited,
    /// Emitted when a suggestion is merged into a draft.
    DocumentSuggestionAccepted,
    /// Emitted when a publisher is assigned to an editor.
    AssignmentCreated,
    /// Emitted when a publisher assignment is removed.
    AssignmentRemoved,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DocumentCreated => "document.created",
            Self::DocumentSubmitted => "document.submitted",
            Self::DocumentReturnedToDraft => "document.returned_to_draft",
            Self::DocumentPublished => "document.published",
            Self::DocumentUnpublished => "document.unpublished",
            Self::DocumentEdited => "document.edited",
            Self::DocumentSuggestionAccepted => "document.suggestion_accepted",
            Self::AssignmentCreated => "assignment.created",
            Self::AssignmentRemoved => "assignment.removed",
        }
    }
}

impl From<LifecycleTransition> for AuditAction {
    fn from(value: LifecycleTransition) -> Self {
        match value {
            LifecycleTransition::Submit => Self::DocumentSubmitted,
            LifecycleTransition::ReturnToDraft => Self::DocumentReturnedToDraft,
            LifecycleTransition::Publish => Self::DocumentPublished,
            LifecycleTransition::Unpublish => Self::DocumentUnpublished,
            LifecycleTransition::EditInPlace => Self::DocumentEdited,
        }
    }
}
