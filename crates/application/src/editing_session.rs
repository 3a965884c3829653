use std::collections::HashMap;
use std::sync::Arc;

use folio_core::{ActorId, AppError, AppResult};
use folio_domain::{Actor, Document, DocumentId, Suggestion, SuggestionQueue};
use tokio::sync::Mutex;
use tracing::info;

use crate::LifecycleService;

type SessionKey = (ActorId, DocumentId);

/// Tracks the live suggestion of every open editing session.
///
/// A session is keyed by actor and document and exists only in memory. Only the
/// author of a draft may open one. It is dropped once its suggestion is accepted
/// or dismissed, or when the document leaves draft.
#[derive(Clone)]
pub struct EditingSessionService {
    lifecycle_service: LifecycleService,
    sessions: Arc<Mutex<HashMap<SessionKey, SuggestionQueue>>>,
}

impl EditingSessionService {
    /// Creates a session tracker backed by the lifecycle service.
    #[must_use]
    pub fn new(lifecycle_service: LifecycleService) -> Self {
        Self {
            lifecycle_service,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Proposes a suggestion for the actor's session on a document.
    ///
    /// The actor must be allowed to edit the draft in place. Blank suggestions
    /// are ignored. Returns whether a suggestion is visible afterwards.
    pub async fn propose(
        &self,
        actor: &Actor,
        document_id: DocumentId,
        suggestion: Suggestion,
    ) -> AppResult<bool> {
        self.lifecycle_service
            .editable_document(actor, document_id)
            .await?;

        let key = (actor.id().clone(), document_id);
        let mut sessions = self.sessions.lock().await;
        if suggestion.is_blank() {
            return Ok(sessions.get(&key).is_some_and(SuggestionQueue::is_visible));
        }

        let queue = sessions.entry(key).or_default();
        queue.propose(suggestion);
        info!(
            document_id = %document_id,
            actor_id = %actor.id(),
            "suggestion proposed"
        );

        Ok(queue.is_visible())
    }

    /// Drops every session open on a document.
    pub async fn close_document(&self, document_id: DocumentId) {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|(_, session_document_id), _| *session_document_id != document_id);

        let closed = before - sessions.len();
        if closed > 0 {
            info!(
                document_id = %document_id,
                closed_sessions = closed,
                "editing sessions closed"
            );
        }
    }

    #[cfg(test)]
    pub(crate) async fn open_session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Returns the live suggestion for the actor's session, if any.
    pub async fn peek(&self, actor: &Actor, document_id: DocumentId) -> Option<Suggestion> {
        self.sessions
            .lock()
            .await
            .get(&(actor.id().clone(), document_id))
            .and_then(|queue| queue.peek().cloned())
    }

    /// Discards the live suggestion without touching the document.
    pub async fn dismiss(&self, actor: &Actor, document_id: DocumentId) {
        let removed = self
            .sessions
            .lock()
            .await
            .remove(&(actor.id().clone(), document_id));

        if removed.is_some_and(|queue| queue.peek().is_some()) {
            info!(
                document_id = %document_id,
                actor_id = %actor.id(),
                "suggestion dismissed"
            );
        }
    }

    /// Merges the live suggestion into the document and clears the session.
    ///
    /// The suggestion stays live when the merge is rejected.
    pub async fn accept(&self, actor: &Actor, document_id: DocumentId) -> AppResult<Document> {
        let suggestion = self.peek(actor, document_id).await.ok_or_else(|| {
            AppError::NotFound(format!(
                "no pending suggestion for document '{document_id}'"
            ))
        })?;

        let document = self
            .lifecycle_service
            .accept_suggestion(actor, document_id, &suggestion)
            .await?;

        let mut sessions = self.sessions.lock().await;
        let key = (actor.id().clone(), document_id);
        // A newer proposal may have arrived while merging.
        if sessions
            .get(&key)
            .and_then(SuggestionQueue::peek)
            .is_some_and(|live| *live == suggestion)
        {
            sessions.remove(&key);
        }

        Ok(document)
    }
}
