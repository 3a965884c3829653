use std::collections::BTreeSet;
use std::sync::Arc;

use folio_core::{ActorId, AppResult};
use folio_domain::{Actor, AssignmentRegistry, AssignmentRelation, AuditAction};
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::{info, warn};

use crate::{AssignmentRepository, AuditEvent, AuditRepository};

/// Application service owning the shared editor/publisher registry.
///
/// Mutations are applied to a copy, persisted, then swapped in under the write
/// lock, so readers never observe a change that failed to persist.
#[derive(Clone)]
pub struct AssignmentService {
    registry: Arc<RwLock<AssignmentRegistry>>,
    repository: Arc<dyn AssignmentRepository>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl AssignmentService {
    /// Loads the persisted relation set and builds the service.
    pub async fn load(
        repository: Arc<dyn AssignmentRepository>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> AppResult<Self> {
        let relations = repository.load_assignments().await?;
        info!(relation_count = relations.len(), "assignment registry loaded");

        Ok(Self {
            registry: Arc::new(RwLock::new(AssignmentRegistry::from_relations(relations))),
            repository,
            audit_repository,
        })
    }

    /// Assigns a publisher to an editor. Re-assigning is a no-op.
    pub async fn assign(
        &self,
        actor: &Actor,
        editor_id: &ActorId,
        publisher_id: &ActorId,
    ) -> AppResult<()> {
        let changed = self
            .mutate(actor, |registry| {
                registry.assign(editor_id, publisher_id, actor.role())
            })
            .await?;

        if changed {
            info!(
                actor_id = %actor.id(),
                editor_id = %editor_id,
                publisher_id = %publisher_id,
                "publisher assigned"
            );
            self.append_audit(actor, AuditAction::AssignmentCreated, editor_id, publisher_id)
                .await;
        }

        Ok(())
    }

    /// Removes a publisher assignment. Removing a missing relation is a no-op.
    pub async fn unassign(
        &self,
        actor: &Actor,
        editor_id: &ActorId,
        publisher_id: &ActorId,
    ) -> AppResult<()> {
        let changed = self
            .mutate(actor, |registry| {
                registry.unassign(editor_id, publisher_id, actor.role())
            })
            .await?;

        if changed {
            info!(
                actor_id = %actor.id(),
                editor_id = %editor_id,
                publisher_id = %publisher_id,
                "publisher unassigned"
            );
            self.append_audit(actor, AuditAction::AssignmentRemoved, editor_id, publisher_id)
                .await;
        }

        Ok(())
    }

    /// Returns publishers assigned to the editor.
    pub async fn publishers_for(&self, editor_id: &ActorId) -> BTreeSet<ActorId> {
        self.registry.read().await.publishers_for(editor_id)
    }

    /// Returns editors the publisher may review.
    pub async fn editors_for(&self, publisher_id: &ActorId) -> BTreeSet<ActorId> {
        self.registry.read().await.editors_for(publisher_id)
    }

    /// Returns whether the publisher is assigned to the editor.
    pub async fn is_assigned(&self, editor_id: &ActorId, publisher_id: &ActorId) -> bool {
        self.registry
            .read()
            .await
            .is_assigned(editor_id, publisher_id)
    }

    /// Lists every relation in stable order.
    pub async fn list_relations(&self) -> Vec<AssignmentRelation> {
        self.registry.read().await.relations().cloned().collect()
    }

    pub(crate) async fn read_registry(&self) -> RwLockReadGuard<'_, AssignmentRegistry> {
        self.registry.read().await
    }

    async fn mutate<F>(&self, actor: &Actor, operation: F) -> AppResult<bool>
    where
        F: FnOnce(&mut AssignmentRegistry) -> AppResult<bool>,
    {
        let mut registry = self.registry.write().await;
        let mut next = registry.clone();

        let changed = match operation(&mut next) {
            Ok(changed) => changed,
            Err(error) => {
                warn!(actor_id = %actor.id(), error = %error, "assignment change rejected");
                return Err(error);
            }
        };

        if changed {
            self.repository
                .save_assignments(&next.to_relation_set())
                .await?;
            *registry = next;
        }

        Ok(changed)
    }

    async fn append_audit(
        &self,
        actor: &Actor,
        action: AuditAction,
        editor_id: &ActorId,
        publisher_id: &ActorId,
    ) {
        let appended = self
            .audit_repository
            .append_event(AuditEvent {
                subject: actor.id().to_string(),
                action,
                resource_type: "assignment".to_owned(),
                resource_id: format!("{editor_id}:{publisher_id}"),
                from_status: None,
                to_status: None,
                detail: Some(format!(
                    "editor '{editor_id}' / publisher '{publisher_id}'"
                )),
            })
            .await;

        // The registry change is already persisted and visible.
        if let Err(error) = appended {
            warn!(
                actor_id = %actor.id(),
                action = action.as_str(),
                error = %error,
                "failed to record audit event"
            );
        }
    }
}
