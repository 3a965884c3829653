use folio_core::ActorId;
use serde::{Deserialize, Serialize};

use crate::Role;

/// Identity and role performing an operation in the current session.
///
/// Actors are trusted values supplied by the session collaborator. A role
/// change produces a new actor value; cached decisions must be discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    id: ActorId,
    role: Role,
}

impl Actor {
    /// Creates an actor from a trusted identity and role.
    #[must_use]
    pub fn new(id: ActorId, role: Role) -> Self {
        Self { id, role }
    }

    /// Returns the actor identifier.
    #[must_use]
    pub fn id(&self) -> &ActorId {
        &self.id
    }

    /// Returns the current role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }
}
