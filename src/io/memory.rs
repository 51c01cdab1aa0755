//! In-memory backend
//!
//! Holds the document in shared memory instead of a file. Clones share the
//! same slot, so a test can keep one handle, give another to a store, and
//! inspect exactly what the store saved. Saves can be made to fail to
//! exercise the recoverable-error path.

use crate::core::traits::DocumentBackend;
use crate::io::PersistedDocument;
use crate::types::CashFlowError;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Document kept in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    document: Rc<RefCell<Option<PersistedDocument>>>,
    fail_saves: Rc<Cell<bool>>,
    saves: Rc<Cell<usize>>,
}

impl MemoryBackend {
    /// Create a backend with no document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend that already holds `document`
    pub fn with_document(document: PersistedDocument) -> Self {
        let backend = Self::default();
        backend.document.replace(Some(document));
        backend
    }

    /// Last saved (or initial) document
    pub fn document(&self) -> Option<PersistedDocument> {
        self.document.borrow().clone()
    }

    /// Make subsequent saves fail (or succeed again)
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl DocumentBackend for MemoryBackend {
    fn load(&mut self) -> Result<Option<PersistedDocument>, CashFlowError> {
        Ok(self.document())
    }

    fn save(&mut self, document: &PersistedDocument) -> Result<(), CashFlowError> {
        if self.fail_saves.get() {
            return Err(CashFlowError::database_save(
                &self.describe(),
                "simulated write failure",
            ));
        }
        self.document.replace(Some(document.clone()));
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_document() {
        let handle = MemoryBackend::new();
        let mut backend = handle.clone();

        backend.save(&PersistedDocument::default()).unwrap();

        assert_eq!(handle.document(), Some(PersistedDocument::default()));
        assert_eq!(handle.save_count(), 1);
    }

    #[test]
    fn test_failing_save_keeps_previous_document() {
        let handle = MemoryBackend::with_document(PersistedDocument::default());
        let mut backend = handle.clone();
        handle.set_fail_saves(true);

        let mut changed = PersistedDocument::default();
        changed.accounts.push("Main:0".to_string());
        let result = backend.save(&changed);

        assert!(matches!(result, Err(CashFlowError::DatabaseSave { .. })));
        assert_eq!(handle.document(), Some(PersistedDocument::default()));
        assert_eq!(handle.save_count(), 0);
    }
}
