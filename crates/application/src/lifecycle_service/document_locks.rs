use std::collections::HashMap;
use std::sync::Arc;

use folio_domain::DocumentId;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per-document mutual exclusion for in-process writers.
#[derive(Debug, Default, Clone)]
pub(crate) struct DocumentLocks {
    locks: Arc<Mutex<HashMap<DocumentId, Arc<Mutex<()>>>>>,
}

impl DocumentLocks {
    /// Waits until no other writer holds `document_id`.
    pub(crate) async fn acquire(&self, document_id: DocumentId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            // Drop entries nobody holds or waits on.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(document_id).or_default().clone()
        };

        lock.lock_owned().await
    }
}
