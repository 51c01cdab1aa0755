//! JSON file backend
//!
//! Keeps the document in a single pretty-printed JSON file (`database.json`
//! by convention).
//!
//! # Atomic Writes
//!
//! Every save writes the full document to a sibling `.tmp` file and renames
//! it over the target, so an interrupted save leaves the previous document
//! intact.

use crate::core::traits::DocumentBackend;
use crate::io::PersistedDocument;
use crate::types::CashFlowError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default document location, relative to the working directory
pub const DEFAULT_DATABASE_PATH: &str = "database.json";

/// Document stored in a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileBackend { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl DocumentBackend for JsonFileBackend {
    fn load(&mut self) -> Result<Option<PersistedDocument>, CashFlowError> {
        if !self.path.exists() {
            debug!("No document at {:?}", self.path);
            return Ok(None);
        }

        let location = self.describe();
        let content = fs::read_to_string(&self.path)
            .map_err(|e| CashFlowError::database_init(&location, e.to_string()))?;
        let document = PersistedDocument::from_json(&content)
            .map_err(|e| CashFlowError::database_init(&location, e.to_string()))?;

        debug!(
            "Loaded {} accounts and {} transactions from {:?}",
            document.accounts.len(),
            document.transactions.len(),
            self.path
        );
        Ok(Some(document))
    }

    fn save(&mut self, document: &PersistedDocument) -> Result<(), CashFlowError> {
        let location = self.describe();
        let content = document
            .to_json()
            .map_err(|e| CashFlowError::database_save(&location, e.to_string()))?;

        let temp_path = self.temp_path();
        fs::write(&temp_path, content)
            .and_then(|()| fs::rename(&temp_path, &self.path))
            .map_err(|e| {
                // the temp file may not exist if the write itself failed
                let _ = fs::remove_file(&temp_path);
                CashFlowError::database_save(&location, e.to_string())
            })?;

        debug!("Saved document to {:?}", self.path);
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
