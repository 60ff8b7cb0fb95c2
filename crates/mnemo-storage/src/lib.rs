//! # mnemo-storage
//!
//! SQLite-backed graph store: typed entities, unique typed edges, fuzzy
//! name search, bounded traversal, and transactional bulk import.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;
pub mod traversal;

pub use engine::GraphStore;
pub use traversal::{TraversalOptions, TraversalOutcome};

use mnemo_core::errors::{MnemoError, StorageError};

/// Helper to convert a driver or serialization failure into a storage error.
pub(crate) fn to_storage_err(msg: impl Into<String>) -> MnemoError {
    StorageError::SqliteError {
        message: msg.into(),
    }
    .into()
}
