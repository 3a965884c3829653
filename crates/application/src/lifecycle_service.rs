use std::sync::Arc;

use chrono::Utc;
use folio_core::{AppError, AppResult};
use folio_domain::{
    Actor, AuditAction, ChangeMergeEngine, Document, DocumentId, DocumentLifecycle,
    DocumentStatus, LifecycleCommand, LifecycleTransition, Role, Suggestion, ensure_editable,
};
use tracing::{info, warn};

use crate::{
    AssignmentService, AuditEvent, AuditRepository, CreateDocumentInput, DocumentListQuery,
    DocumentRepository, TransitionInput,
};

mod document_locks;

use document_locks::DocumentLocks;

const MAX_LIST_LIMIT: usize = 200;

/// Application service driving the document lifecycle.
///
/// All writes for one document id are serialized in-process; the repository's
/// revision check protects against writers in other processes.
#[derive(Clone)]
pub struct LifecycleService {
    repository: Arc<dyn DocumentRepository>,
    assignment_service: AssignmentService,
    audit_repository: Arc<dyn AuditRepository>,
    merge_engine: Arc<dyn ChangeMergeEngine>,
    locks: DocumentLocks,
}

impl LifecycleService {
    /// Creates a new lifecycle service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn DocumentRepository>,
        assignment_service: AssignmentService,
        audit_repository: Arc<dyn AuditRepository>,
        merge_engine: Arc<dyn ChangeMergeEngine>,
    ) -> Self {
        Self {
            repository,
            assignment_service,
            audit_repository,
            merge_engine,
            locks: DocumentLocks::default(),
        }
    }

    /// Creates a draft owned by the acting editor.
    pub async fn create_document(
        &self,
        actor: &Actor,
        input: CreateDocumentInput,
    ) -> AppResult<Document> {
        if !actor.role().has_at_least(Role::Edit) {
            return Err(AppError::Authorization(format!(
                "actor '{}' with role '{}' cannot create documents; role '{}' is required",
                actor.id(),
                actor.role(),
                Role::Edit
            )));
        }

        let document = Document::new_draft(
            input.kind,
            input.title,
            input.body,
            actor.id().clone(),
            Utc::now(),
        )?;
        self.repository.create_document(document.clone()).await?;

        info!(
            document_id = %document.id(),
            actor_id = %actor.id(),
            kind = document.kind().as_str(),
            "document created"
        );
        self.append_audit(actor, AuditAction::DocumentCreated, None, &document, None)
            .await;

        Ok(document)
    }

    /// Returns one document.
    pub async fn get_document(&self, document_id: DocumentId) -> AppResult<Document> {
        self.load_document(document_id).await
    }

    /// Returns a draft the actor may edit in place.
    pub async fn editable_document(
        &self,
        actor: &Actor,
        document_id: DocumentId,
    ) -> AppResult<Document> {
        let document = self.load_document(document_id).await?;
        self.log_rejection(actor, &document, ensure_editable(actor, &document))?;

        Ok(document)
    }

    /// Lists documents matching the query.
    pub async fn list_documents(&self, mut query: DocumentListQuery) -> AppResult<Vec<Document>> {
        if query.limit == 0 || query.limit > MAX_LIST_LIMIT {
            query.limit = MAX_LIST_LIMIT;
        }

        self.repository.list_documents(query).await
    }

    /// Moves a document to another status.
    pub async fn transition(
        &self,
        actor: &Actor,
        document_id: DocumentId,
        input: TransitionInput,
    ) -> AppResult<Document> {
        let note = input.note.filter(|value| !value.trim().is_empty());
        let command = LifecycleCommand::MoveTo {
            target: input.target,
            publisher_id: input.publisher_id,
        };

        self.apply(actor, document_id, command, note).await
    }

    /// Replaces the body of a draft.
    pub async fn edit_body(
        &self,
        actor: &Actor,
        document_id: DocumentId,
        body: String,
    ) -> AppResult<Document> {
        self.apply(actor, document_id, LifecycleCommand::EditBody { body }, None)
            .await
    }

    /// Merges an accepted suggestion into a draft body.
    pub async fn accept_suggestion(
        &self,
        actor: &Actor,
        document_id: DocumentId,
        suggestion: &Suggestion,
    ) -> AppResult<Document> {
        let _guard = self.locks.acquire(document_id).await;
        let current = self.load_document(document_id).await?;
        let merged_body = self.merge_engine.merge(current.body(), suggestion);

        let next = {
            let registry = self.assignment_service.read_registry().await;
            DocumentLifecycle::new(&registry).edit_body(actor, &current, merged_body, Utc::now())
        };
        let next = self.log_rejection(actor, &current, next)?;

        self.repository
            .save_document(next.clone(), current.revision())
            .await?;

        info!(
            document_id = %document_id,
            actor_id = %actor.id(),
            operation_type = %suggestion.operation_type,
            "suggestion merged into document"
        );
        self.append_audit(
            actor,
            AuditAction::DocumentSuggestionAccepted,
            Some(current.status()),
            &next,
            Some(format!(
                "{}: {}",
                suggestion.operation_type, suggestion.operation_description
            )),
        )
        .await;

        Ok(next)
    }

    async fn apply(
        &self,
        actor: &Actor,
        document_id: DocumentId,
        command: LifecycleCommand,
        note: Option<String>,
    ) -> AppResult<Document> {
        let _guard = self.locks.acquire(document_id).await;
        let current = self.load_document(document_id).await?;

        let next = {
            let registry = self.assignment_service.read_registry().await;
            DocumentLifecycle::new(&registry).apply(actor, &current, command, Utc::now())
        };
        let next = self.log_rejection(actor, &current, next)?;

        self.repository
            .save_document(next.clone(), current.revision())
            .await?;

        let transition = if current.status() == next.status() {
            LifecycleTransition::EditInPlace
        } else {
            LifecycleTransition::resolve(current.status(), next.status())?
        };

        info!(
            document_id = %document_id,
            actor_id = %actor.id(),
            from = %current.status(),
            to = %next.status(),
            transition = transition.as_str(),
            "document lifecycle updated"
        );
        self.append_audit(
            actor,
            AuditAction::from(transition),
            Some(transition.from_status()),
            &next,
            note,
        )
        .await;

        Ok(next)
    }

    async fn load_document(&self, document_id: DocumentId) -> AppResult<Document> {
        self.repository
            .find_document(document_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("document '{document_id}' does not exist")))
    }

    fn log_rejection<T>(
        &self,
        actor: &Actor,
        current: &Document,
        result: AppResult<T>,
    ) -> AppResult<T> {
        if let Err(error) = &result {
            warn!(
                document_id = %current.id(),
                actor_id = %actor.id(),
                status = %current.status(),
                error = %error,
                "document lifecycle request rejected"
            );
        }

        result
    }

    // Runs after the save; a failed write is logged and never returned.
    async fn append_audit(
        &self,
        actor: &Actor,
        action: AuditAction,
        from_status: Option<DocumentStatus>,
        document: &Document,
        detail: Option<String>,
    ) {
        let appended = self
            .audit_repository
            .append_event(AuditEvent {
                subject: actor.id().to_string(),
                action,
                resource_type: document.kind().as_str().to_owned(),
                resource_id: document.id().to_string(),
                from_status,
                to_status: Some(document.status()),
                detail,
            })
            .await;

        if let Err(error) = appended {
            warn!(
                document_id = %document.id(),
                action = action.as_str(),
                error = %error,
                "failed to record audit event"
            );
        }
    }
}
