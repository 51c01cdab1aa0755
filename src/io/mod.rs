//! I/O module
//!
//! Handles the persisted document and where it is stored.
//!
//! # Components
//!
//! - `document` - Document schema and conversion to/from typed records
//! - `json_file` - JSON file backend with atomic writes
//! - `memory` - In-memory backend for tests and embedding

pub mod document;
pub mod json_file;
pub mod memory;

pub use document::{PersistedDocument, Records};
pub use json_file::{JsonFileBackend, DEFAULT_DATABASE_PATH};
pub use memory::MemoryBackend;
