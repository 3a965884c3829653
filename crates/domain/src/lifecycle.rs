//! Role-gated document lifecycle state machine.
//!
//! Every operation borrows the current document and returns a new value, so a
//! rejected request never leaves a partially mutated document behind.

use chrono::{DateTime, Utc};
use folio_core::{ActorId, AppError, AppResult};

use crate::{Actor, AssignmentRegistry, Document, DocumentStatus, Role};

/// Named row of the lifecycle transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleTransition {
    /// `draft -> under-review`.
    Submit,
    /// `under-review -> draft`.
    ReturnToDraft,
    /// `under-review -> published`.
    Publish,
    /// `published -> draft`.
    Unpublish,
    /// `draft -> draft` body edit.
    EditInPlace,
}

impl LifecycleTransition {
    /// Resolves a status move into a table row.
    ///
    /// `draft -> draft` is only reachable through [`DocumentLifecycle::edit_body`]
    /// and is rejected here.
    pub fn resolve(from: DocumentStatus, to: DocumentStatus) -> AppResult<Self> {
        match (from, to) {
            (DocumentStatus::Draft, DocumentStatus::UnderReview) => Ok(Self::Submit),
            (DocumentStatus::UnderReview, DocumentStatus::Draft) => Ok(Self::ReturnToDraft),
            (DocumentStatus::UnderReview, DocumentStatus::Published) => Ok(Self::Publish),
            (DocumentStatus::Published, DocumentStatus::Draft) => Ok(Self::Unpublish),
            _ => Err(AppError::IllegalTransition(format!(
                "no transition from '{from}' to '{to}'"
            ))),
        }
    }

    /// Status the transition starts from.
    #[must_use]
    pub fn from_status(&self) -> DocumentStatus {
        match self {
            Self::Submit | Self::EditInPlace => DocumentStatus::Draft,
            Self::ReturnToDraft | Self::Publish => DocumentStatus::UnderReview,
            Self::Unpublish => DocumentStatus::Published,
        }
    }

    /// Status the transition ends in.
    #[must_use]
    pub fn to_status(&self) -> DocumentStatus {
        match self {
            Self::Submit => DocumentStatus::UnderReview,
            Self::ReturnToDraft | Self::Unpublish | Self::EditInPlace => DocumentStatus::Draft,
            Self::Publish => DocumentStatus::Published,
        }
    }

    /// Returns a stable label for logs and audit details.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::ReturnToDraft => "return_to_draft",
            Self::Publish => "publish",
            Self::Unpublish => "unpublish",
            Self::EditInPlace => "edit_in_place",
        }
    }
}

/// Lifecycle request issued by the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleCommand {
    /// Moves the document to another status.
    MoveTo {
        /// Requested status.
        target: DocumentStatus,
        /// Publisher chosen when submitting for review.
        publisher_id: Option<ActorId>,
    },
    /// Replaces the body of a draft.
    EditBody {
        /// New block-markup body.
        body: String,
    },
}

/// Transition evaluator bound to an assignment snapshot.
#[derive(Debug, Clone, Copy)]
pub struct DocumentLifecycle<'a> {
    assignments: &'a AssignmentRegistry,
}

impl<'a> DocumentLifecycle<'a> {
    /// Creates an evaluator that authorizes against `assignments`.
    #[must_use]
    pub fn new(assignments: &'a AssignmentRegistry) -> Self {
        Self { assignments }
    }

    /// Applies a command and returns the resulting document.
    pub fn apply(
        &self,
        actor: &Actor,
        document: &Document,
        command: LifecycleCommand,
        at: DateTime<Utc>,
    ) -> AppResult<Document> {
        match command {
            LifecycleCommand::MoveTo {
                target,
                publisher_id,
            } => self.transition(actor, document, target, publisher_id.as_ref(), at),
            LifecycleCommand::EditBody { body } => self.edit_body(actor, document, body, at),
        }
    }

    /// Moves a document to `target`, enforcing the transition guard.
    pub fn transition(
        &self,
        actor: &Actor,
        document: &Document,
        target: DocumentStatus,
        publisher_id: Option<&ActorId>,
        at: DateTime<Utc>,
    ) -> AppResult<Document> {
        let transition = LifecycleTransition::resolve(document.status(), target)?;
        let mut next = document.clone();

        match transition {
            LifecycleTransition::Submit => {
                require_author_with_role(actor, document, Role::Edit, true)?;
                let publisher_id = self.validate_publisher_choice(actor, document, publisher_id)?;
                next.set_assigned_publisher(Some(publisher_id));
            }
            LifecycleTransition::ReturnToDraft => {
                self.require_reviewer(actor, document)?;
                next.set_assigned_publisher(None);
            }
            LifecycleTransition::Publish => {
                self.require_reviewer(actor, document)?;
                next.mark_published(at);
            }
            LifecycleTransition::Unpublish => {
                require_role(actor, Role::Admin, "unpublish a document")?;
                next.set_assigned_publisher(None);
            }
            LifecycleTransition::EditInPlace => {
                return Err(AppError::IllegalTransition(
                    "body edits are not status transitions".to_owned(),
                ));
            }
        }

        next.set_status(transition.to_status());
        next.touch(at);
        Ok(next)
    }

    /// Replaces the body of a draft owned by the actor.
    pub fn edit_body(
        &self,
        actor: &Actor,
        document: &Document,
        body: String,
        at: DateTime<Utc>,
    ) -> AppResult<Document> {
        ensure_editable(actor, document)?;

        let mut next = document.clone();
        next.set_body(body);
        next.touch(at);
        Ok(next)
    }

    fn require_reviewer(&self, actor: &Actor, document: &Document) -> AppResult<()> {
        if actor.role().is_admin() {
            return Ok(());
        }

        require_role(actor, Role::Publish, "review a document")?;

        if !self.assignments.is_assigned(document.author_id(), actor.id()) {
            return Err(AppError::Authorization(format!(
                "actor '{}' is not assigned as publisher for author '{}'",
                actor.id(),
                document.author_id()
            )));
        }

        Ok(())
    }

    fn validate_publisher_choice(
        &self,
        actor: &Actor,
        document: &Document,
        publisher_id: Option<&ActorId>,
    ) -> AppResult<ActorId> {
        let publisher_id = publisher_id.ok_or_else(|| {
            AppError::Validation("a publisher must be chosen to submit for review".to_owned())
        })?;

        if publisher_id == document.author_id() {
            return Err(AppError::Validation(format!(
                "author '{publisher_id}' cannot review their own document"
            )));
        }

        if !actor.role().is_admin()
            && !self
                .assignments
                .is_assigned(document.author_id(), publisher_id)
        {
            return Err(AppError::Validation(format!(
                "publisher '{publisher_id}' is not assigned to author '{}'",
                document.author_id()
            )));
        }

        Ok(publisher_id.clone())
    }
}

/// Checks that `actor` may change the body of `document` in place.
///
/// Only the author, holding at least `edit`, may touch a draft. Admins get no
/// override here.
pub fn ensure_editable(actor: &Actor, document: &Document) -> AppResult<()> {
    if document.status() != DocumentStatus::Draft {
        return Err(AppError::IllegalTransition(format!(
            "document '{}' in status '{}' cannot be edited",
            document.id(),
            document.status()
        )));
    }

    require_author_with_role(actor, document, Role::Edit, false)
}

fn require_role(actor: &Actor, threshold: Role, operation: &str) -> AppResult<()> {
    if actor.role().has_at_least(threshold) {
        return Ok(());
    }

    Err(AppError::Authorization(format!(
        "actor '{}' with role '{}' cannot {operation}; role '{threshold}' is required",
        actor.id(),
        actor.role()
    )))
}

fn require_author_with_role(
    actor: &Actor,
    document: &Document,
    threshold: Role,
    admin_override: bool,
) -> AppResult<()> {
    if admin_override && actor.role().is_admin() {
        return Ok(());
    }

    require_role(actor, threshold, "modify a draft")?;

    if actor.id() != document.author_id() {
        return Err(AppError::Authorization(format!(
            "actor '{}' is not the author of document '{}'",
            actor.id(),
            document.id()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests;
