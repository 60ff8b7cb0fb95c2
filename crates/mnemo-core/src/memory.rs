//! Helpers shared by ingestion and retrieval for memory metadata.

use crate::constants::{meta_keys, MEMORY_TYPE_CODE};
use crate::properties::{get_str, Properties};

/// Graph id of the File entity for a path.
pub fn file_entity_id(path: &str) -> String {
    format!("file:{path}")
}

/// First `max_chars` characters of `content`.
pub fn content_preview(content: &str, max_chars: usize) -> String {
    content.chars().take(max_chars).collect()
}

/// True when the metadata marks the memory as source code.
pub fn is_code(metadata: &Properties) -> bool {
    get_str(metadata, meta_keys::TYPE) == Some(MEMORY_TYPE_CODE)
}

/// The `file_path` metadata value, if any and non-empty.
pub fn file_path(metadata: &Properties) -> Option<&str> {
    get_str(metadata, meta_keys::FILE_PATH).filter(|p| !p.is_empty())
}
