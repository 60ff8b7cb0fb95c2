/// Length of the deterministic fallback embedding.
pub const FALLBACK_EMBEDDING_DIMENSIONS: usize = 1536;

/// Divisor applied to each code point by the fallback embedding.
pub const FALLBACK_CODE_POINT_SCALE: f32 = 1000.0;

/// Hard ceiling on traversal depth regardless of caller input.
pub const MAX_TRAVERSAL_DEPTH: usize = 50;

/// Version tag written into export documents.
pub const EXPORT_FORMAT_VERSION: &str = "1.0";

/// Number of random base-36 characters in a generated memory id.
pub const MEMORY_ID_SUFFIX_LEN: usize = 9;

// Entity type tags.
pub const ENTITY_FILE: &str = "File";
pub const ENTITY_MEMORY: &str = "Memory";
pub const ENTITY_FUNCTION: &str = "Function";
pub const ENTITY_CLASS: &str = "Class";
pub const ENTITY_IMPORT: &str = "Import";
pub const ENTITY_PROJECT: &str = "Project";

// Relationship type tags.
pub const REL_HAS_MEMORY: &str = "HAS_MEMORY";
pub const REL_CONTAINS: &str = "CONTAINS";
pub const REL_IMPORTS: &str = "IMPORTS";
pub const REL_CONTAINS_FILE: &str = "CONTAINS_FILE";

/// Metadata keys with meaning to the engine.
pub mod meta_keys {
    pub const MEMORY_ID: &str = "memory_id";
    pub const CREATED_AT: &str = "created_at";
    pub const UPDATED_AT: &str = "updated_at";
    pub const TIMESTAMP: &str = "timestamp";
    pub const TYPE: &str = "type";
    pub const FILE_PATH: &str = "file_path";
    pub const RELATIVE_PATH: &str = "relative_path";
    pub const PROJECT: &str = "project";
    pub const TITLE: &str = "title";
    pub const CONTENT_PREVIEW: &str = "content_preview";
}

/// Memory `type` value that triggers structural extraction.
pub const MEMORY_TYPE_CODE: &str = "code";
