// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_PATH: &str = "./memory.db";
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

// --- Vector index ---
pub const DEFAULT_PERSIST_DIRECTORY: &str = "./chroma_db";
pub const DEFAULT_SNAPSHOT_FILE: &str = "memory_store.json";

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 1536;
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";
pub const DEFAULT_AZURE_API_VERSION: &str = "2024-02-15-preview";
pub const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1";
pub const DEFAULT_EMBEDDING_CACHE_SIZE: u64 = 10_000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// --- Retrieval ---
pub const DEFAULT_QUERY_LIMIT: usize = 5;
pub const DEFAULT_STRUCTURAL_TOP_K: usize = 5;
pub const DEFAULT_TRAVERSAL_DEPTH: usize = 2;
pub const DEFAULT_FUSION_BOOST: f64 = 0.2;
pub const DEFAULT_STRUCTURAL_SCORE: f64 = 0.7;
pub const DEFAULT_FUSED_LIMIT: usize = 10;
pub const DEFAULT_MAX_TRAVERSAL_NODES: usize = 10_000;
pub const DEFAULT_TRAVERSAL_TIMEOUT_MS: u64 = 2_000;

// --- Ingest ---
pub const DEFAULT_PREVIEW_CHARS: usize = 200;
pub const DEFAULT_CODE_MEMORY_NAME: &str = "Code Memory";
