use serde::{Deserialize, Serialize};

use super::defaults;

/// Ingestion configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Characters of content copied into a Memory entity's preview.
    pub preview_chars: usize,
    /// Memory entity name when metadata carries no `title`.
    pub default_memory_name: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            preview_chars: defaults::DEFAULT_PREVIEW_CHARS,
            default_memory_name: defaults::DEFAULT_CODE_MEMORY_NAME.to_string(),
        }
    }
}
