use std::collections::BTreeSet;

use async_trait::async_trait;
use folio_core::AppResult;
use folio_domain::AssignmentRelation;

/// Persistence port for the editor/publisher relation set.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Loads every stored relation.
    async fn load_assignments(&self) -> AppResult<BTreeSet<AssignmentRelation>>;

    /// Replaces the stored relation set.
    async fn save_assignments(&self, relations: &BTreeSet<AssignmentRelation>) -> AppResult<()>;
}
