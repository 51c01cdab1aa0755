//! Trait abstractions at the persistence seam
//!
//! The store only knows how to load and save a [`PersistedDocument`]; where
//! the document lives is decided by the backend. The binary uses a JSON
//! file, tests use an in-memory backend.

use crate::io::PersistedDocument;
use crate::types::CashFlowError;

/// Storage location of the persisted document
pub trait DocumentBackend {
    /// Read the document
    ///
    /// Returns `Ok(None)` when no document exists yet.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseInit` when a document exists but cannot be read or
    /// does not have the expected shape.
    fn load(&mut self) -> Result<Option<PersistedDocument>, CashFlowError>;

    /// Replace the stored document with `document`
    ///
    /// # Errors
    ///
    /// Returns `DatabaseSave` when the write cannot complete.
    fn save(&mut self, document: &PersistedDocument) -> Result<(), CashFlowError>;

    /// Human readable location, used in messages and logs
    fn describe(&self) -> String;
}
