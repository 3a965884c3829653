use std::collections::BTreeSet;

use async_trait::async_trait;
use folio_application::AssignmentRepository;
use folio_core::AppResult;
use folio_domain::AssignmentRelation;
use tokio::sync::RwLock;

/// In-memory editor/publisher assignment repository.
#[derive(Debug, Default)]
pub struct InMemoryAssignmentRepository {
    relations: RwLock<BTreeSet<AssignmentRelation>>,
}

impl InMemoryAssignmentRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryAssignmentRepository {
    async fn load_assignments(&self) -> AppResult<BTreeSet<AssignmentRelation>> {
        Ok(self.relations.read().await.clone())
    }

    async fn save_assignments(&self, relations: &BTreeSet<AssignmentRelation>) -> AppResult<()> {
        *self.relations.write().await = relations.clone();
        Ok(())
    }
}
