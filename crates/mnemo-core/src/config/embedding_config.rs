use serde::{Deserialize, Serialize};

use super::defaults;

/// Which embedding backend to put at the head of the degradation chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProviderKind {
    /// Deterministic local embedding only.
    #[default]
    Fallback,
    /// OpenAI-compatible `/embeddings` endpoint with bearer auth.
    OpenAi,
    /// Azure OpenAI deployment with `api-key` auth.
    Azure,
}

/// Embedding subsystem configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub provider: EmbeddingProviderKind,
    /// Base URL. For Azure, the resource endpoint.
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    /// Azure deployment name.
    pub deployment: Option<String>,
    pub api_version: String,
    pub model: String,
    /// Vector length produced by every provider in the chain.
    pub dimensions: usize,
    /// In-memory cache max entries.
    pub cache_size: u64,
    pub request_timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderKind::default(),
            endpoint: None,
            api_key: None,
            deployment: None,
            api_version: defaults::DEFAULT_AZURE_API_VERSION.to_string(),
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            cache_size: defaults::DEFAULT_EMBEDDING_CACHE_SIZE,
            request_timeout_secs: defaults::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}
