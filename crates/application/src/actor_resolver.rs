use std::str::FromStr;

use folio_core::{ActorId, AppError, AppResult};
use folio_domain::{Actor, Role};

/// How request actors are identified.
///
/// Chosen once at construction; there is no process-wide switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityConfig {
    /// Every request acts as the configured actor. Development only.
    Mock {
        /// Actor used for every request.
        actor: Actor,
    },
    /// Actor id and role are supplied by a trusted upstream authenticator.
    TrustedHeaders,
}

/// Resolves the trusted actor for an operation.
#[derive(Debug, Clone)]
pub struct ActorResolver {
    config: IdentityConfig,
}

impl ActorResolver {
    /// Creates a resolver from explicit identity configuration.
    #[must_use]
    pub fn new(config: IdentityConfig) -> Self {
        Self { config }
    }

    /// Returns whether mock identity is active.
    #[must_use]
    pub fn is_mock(&self) -> bool {
        matches!(self.config, IdentityConfig::Mock { .. })
    }

    /// Resolves an actor from upstream identity claims.
    pub fn resolve(&self, actor_id: Option<&str>, role: Option<&str>) -> AppResult<Actor> {
        match &self.config {
            IdentityConfig::Mock { actor } => Ok(actor.clone()),
            IdentityConfig::TrustedHeaders => {
                let actor_id = actor_id
                    .filter(|value| !value.trim().is_empty())
                    .ok_or_else(|| AppError::Unauthorized("actor identity required".to_owned()))?;
                let role = role
                    .ok_or_else(|| AppError::Unauthorized("actor role required".to_owned()))?;

                Ok(Actor::new(ActorId::new(actor_id)?, Role::from_str(role)?))
            }
        }
    }
}
