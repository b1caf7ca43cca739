use std::sync::Arc;

use parking_lot::Mutex;

use super::{UrlRecord, UrlStore};
use crate::errors::Result;

/// In-memory snapshot store.
///
/// Clones share the same snapshot, so a test can keep a handle and inspect
/// what the service persisted.
#[derive(Clone, Default)]
pub struct MemoryStore {
    snapshot: Arc<Mutex<Vec<UrlRecord>>>,
    saves: Arc<Mutex<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<UrlRecord>) -> Self {
        Self {
            snapshot: Arc::new(Mutex::new(records)),
            saves: Arc::default(),
        }
    }

    /// Current persisted snapshot
    pub fn records(&self) -> Vec<UrlRecord> {
        self.snapshot.lock().clone()
    }

    /// Number of `save` calls so far
    pub fn save_count(&self) -> usize {
        *self.saves.lock()
    }
}

impl UrlStore for MemoryStore {
    fn load(&self) -> Result<Vec<UrlRecord>> {
        Ok(self.snapshot.lock().clone())
    }

    fn save(&self, records: &[UrlRecord]) -> Result<()> {
        *self.snapshot.lock() = records.to_vec();
        *self.saves.lock() += 1;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
