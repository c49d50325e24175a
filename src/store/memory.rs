use std::sync::{Arc, Mutex};

use crate::error::TasquestError;
use crate::models::Document;
use crate::store::DocumentStore;

/// In-process store. Clones share the same slot, so a test can keep a handle
/// while the save queue owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Slot>>,
}

#[derive(Debug, Default)]
struct Slot {
    doc: Option<Document>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(doc: Document) -> Self {
        let store = Self::default();
        if let Ok(mut slot) = store.inner.lock() {
            slot.doc = Some(doc);
        }
        store
    }

    pub fn snapshot(&self) -> Option<Document> {
        self.inner.lock().ok().and_then(|slot| slot.doc.clone())
    }

    /// Number of completed `save` calls.
    pub fn saves(&self) -> usize {
        self.inner.lock().map(|slot| slot.saves).unwrap_or(0)
    }
}

impl DocumentStore for MemoryStore {
    fn try_load(&self) -> Result<Option<Document>, TasquestError> {
        let slot = self
            .inner
            .lock()
            .map_err(|_| TasquestError::persistence("memory store poisoned"))?;
        Ok(slot.doc.clone())
    }

    fn save(&self, doc: &Document) -> Result<(), TasquestError> {
        let mut slot = self
            .inner
            .lock()
            .map_err(|_| TasquestError::persistence("memory store poisoned"))?;
        slot.doc = Some(doc.clone());
        slot.saves += 1;
        Ok(())
    }
}
