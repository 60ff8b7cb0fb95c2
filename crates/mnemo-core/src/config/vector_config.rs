use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Vector index configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorConfig {
    /// Directory holding the snapshot file.
    pub persist_directory: String,
    /// Snapshot file name inside `persist_directory`.
    pub snapshot_file: String,
}

impl VectorConfig {
    pub fn snapshot_path(&self) -> PathBuf {
        PathBuf::from(&self.persist_directory).join(&self.snapshot_file)
    }
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self {
            persist_directory: defaults::DEFAULT_PERSIST_DIRECTORY.to_string(),
            snapshot_file: defaults::DEFAULT_SNAPSHOT_FILE.to_string(),
        }
    }
}
