//! Editor-to-publisher assignment relation.

use std::collections::BTreeSet;

use folio_core::{ActorId, AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::Role;

/// Standing permission link authorizing a publisher to review an editor's work.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "AssignmentRelationFields")]
pub struct AssignmentRelation {
    editor_id: ActorId,
    publisher_id: ActorId,
}

#[derive(Deserialize)]
struct AssignmentRelationFields {
    editor_id: ActorId,
    publisher_id: ActorId,
}

impl TryFrom<AssignmentRelationFields> for AssignmentRelation {
    type Error = AppError;

    fn try_from(value: AssignmentRelationFields) -> Result<Self, Self::Error> {
        Self::new(value.editor_id, value.publisher_id)
    }
}

impl AssignmentRelation {
    /// Creates a relation, rejecting self-assignment.
    pub fn new(editor_id: ActorId, publisher_id: ActorId) -> AppResult<Self> {
        if editor_id == publisher_id {
            return Err(AppError::InvalidAssignment(format!(
                "actor '{editor_id}' cannot be assigned as their own publisher"
            )));
        }

        Ok(Self {
            editor_id,
            publisher_id,
        })
    }

    /// Returns the editor side of the relation.
    #[must_use]
    pub fn editor_id(&self) -> &ActorId {
        &self.editor_id
    }

    /// Returns the publisher side of the relation.
    #[must_use]
    pub fn publisher_id(&self) -> &ActorId {
        &self.publisher_id
    }
}

/// Many-to-many registry of editor/publisher relations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentRegistry {
    relations: BTreeSet<AssignmentRelation>,
}

impl AssignmentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a registry from persisted relations.
    #[must_use]
    pub fn from_relations(relations: impl IntoIterator<Item = AssignmentRelation>) -> Self {
        Self {
            relations: relations.into_iter().collect(),
        }
    }

    /// Assigns a publisher to an editor.
    ///
    /// Returns `true` when the relation was newly inserted; re-assigning an
    /// existing pair is a no-op.
    pub fn assign(
        &mut self,
        editor_id: &ActorId,
        publisher_id: &ActorId,
        requesting_role: Role,
    ) -> AppResult<bool> {
        require_admin(requesting_role, "assign publishers")?;
        let relation = AssignmentRelation::new(editor_id.clone(), publisher_id.clone())?;

        Ok(self.relations.insert(relation))
    }

    /// Removes a publisher assignment from an editor.
    ///
    /// Returns `true` when a relation was removed; removing a missing relation
    /// is a no-op.
    pub fn unassign(
        &mut self,
        editor_id: &ActorId,
        publisher_id: &ActorId,
        requesting_role: Role,
    ) -> AppResult<bool> {
        require_admin(requesting_role, "unassign publishers")?;

        let before = self.relations.len();
        self.relations.retain(|relation| {
            !(relation.editor_id == *editor_id && relation.publisher_id == *publisher_id)
        });

        Ok(self.relations.len() != before)
    }

    /// Returns publishers assigned to the editor.
    #[must_use]
    pub fn publishers_for(&self, editor_id: &ActorId) -> BTreeSet<ActorId> {
        self.relations
            .iter()
            .filter(|relation| relation.editor_id == *editor_id)
            .map(|relation| relation.publisher_id.clone())
            .collect()
    }

    /// Returns editors whose work the publisher may review.
    #[must_use]
    pub fn editors_for(&self, publisher_id: &ActorId) -> BTreeSet<ActorId> {
        self.relations
            .iter()
            .filter(|relation| relation.publisher_id == *publisher_id)
            .map(|relation| relation.editor_id.clone())
            .collect()
    }

    /// Returns whether the publisher is assigned to the editor.
    #[must_use]
    pub fn is_assigned(&self, editor_id: &ActorId, publisher_id: &ActorId) -> bool {
        self.relations.iter().any(|relation| {
            relation.editor_id == *editor_id && relation.publisher_id == *publisher_id
        })
    }

    /// Iterates relations in stable order.
    pub fn relations(&self) -> impl Iterator<Item = &AssignmentRelation> {
        self.relations.iter()
    }

    /// Returns a copy of the relation set for persistence.
    #[must_use]
    pub fn to_relation_set(&self) -> BTreeSet<AssignmentRelation> {
        self.relations.clone()
    }

    /// Number of stored relations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.relations.len()
    }

    /// Returns whether no relation is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}

fn require_admin(role: Role, operation: &str) -> AppResult<()> {
    if role.is_admin() {
        return Ok(());
    }

    Err(AppError::Authorization(format!(
        "role '{role}' cannot {operation}; role '{}' is required",
        Role::Admin
    )))
}

#[cfg(test)]
mod tests {
    use folio_core::{ActorId, AppError};

    use super::{AssignmentRegistry, AssignmentRelation};
    use crate::Role;

    fn actor(value: &str) -> ActorId {
        ActorId::new(value).unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn assign_then_unassign_restores_state() {
        let mut registry = AssignmentRegistry::new();
        let editor = actor("ed1");
        let publisher = actor("pub1");

        assert!(matches!(
            registry.assign(&editor, &publisher, Role::Admin),
            Ok(true)
        ));
        assert!(registry.is_assigned(&editor, &publisher));

        assert!(matches!(
            registry.unassign(&editor, &publisher, Role::Admin),
            Ok(true)
        ));
        assert!(!registry.is_assigned(&editor, &publisher));
        assert!(registry.is_empty());
    }

    #[test]
    fn assign_is_idempotent() {
        let mut registry = AssignmentRegistry::new();
        let editor = actor("ed1");
        let publisher = actor("pub1");

        assert!(registry.assign(&editor, &publisher, Role::Admin).is_ok());
        assert_eq!(registry.len(), 1);
        assert!(matches!(
            registry.assign(&editor, &publisher, Role::Admin),
            Ok(false)
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn non_admin_cannot_mutate_registry() {
        let mut registry = AssignmentRegistry::new();
        let editor = actor("ed1");
        let publisher = actor("pub1");

        for role in [Role::Readonly, Role::Edit, Role::Publish] {
            let result = registry.assign(&editor, &publisher, role);
            assert!(matches!(result, Err(AppError::Authorization(_))));
        }
        assert!(registry.is_empty());

        assert!(registry.assign(&editor, &publisher, Role::Admin).is_ok());
        let result = registry.unassign(&editor, &publisher, Role::Publish);
        assert!(matches!(result, Err(AppError::Authorization(_))));
        assert!(registry.is_assigned(&editor, &publisher));
    }

    #[test]
    fn self_assignment_is_rejected() {
        let mut registry = AssignmentRegistry::new();
        let editor = actor("ed1");

        let result = registry.assign(&editor, &editor, Role::Admin);
        assert!(matches!(result, Err(AppError::InvalidAssignment(_))));
        assert!(AssignmentRelation::new(actor("a"), actor("a")).is_err());
    }

    #[test]
    fn unassigning_missing_relation_is_noop() {
        let mut registry = AssignmentRegistry::new();
        let result = registry.unassign(&actor("ed1"), &actor("pub1"), Role::Admin);
        assert!(matches!(result, Ok(false)));
    }

    #[test]
    fn lookups_follow_both_directions() {
        let mut registry = AssignmentRegistry::new();
        let (ed1, ed2) = (actor("ed1"), actor("ed2"));
        let (pub1, pub2) = (actor("pub1"), actor("pub2"));

        for (editor, publisher) in [(&ed1, &pub1), (&ed1, &pub2), (&ed2, &pub1)] {
            assert!(registry.assign(editor, publisher, Role::Admin).is_ok());
        }

        let publishers = registry.publishers_for(&ed1);
        assert_eq!(publishers.len(), 2);
        assert!(publishers.contains(&pub2));

        let editors = registry.editors_for(&pub1);
        assert_eq!(editors.len(), 2);
        assert!(editors.contains(&ed2));

        assert!(registry.editors_for(&ed1).is_empty());
        assert!(!registry.is_assigned(&ed2, &pub2));
    }

    #[test]
    fn deserialized_relation_rejects_self_assignment() {
        let parsed = serde_json::from_str::<AssignmentRelation>(
            r#"{"editor_id":"ed1","publisher_id":"ed1"}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn registry_rebuilds_from_persisted_relations() {
        let relation = AssignmentRelation::new(actor("ed1"), actor("pub1"))
            .unwrap_or_else(|_| unreachable!());
        let registry = AssignmentRegistry::from_relations([relation.clone(), relation]);

        assert_eq!(registry.len(), 1);
        assert!(registry.is_assigned(&actor("ed1"), &actor("pub1")));
    }
}
