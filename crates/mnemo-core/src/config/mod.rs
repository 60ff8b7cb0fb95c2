//! Configuration. Every section defaults independently, so a TOML file
//! only needs the keys it changes.

pub mod defaults;
mod embedding_config;
mod ingest_config;
mod retrieval_config;
mod storage_config;
mod vector_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use embedding_config::{EmbeddingConfig, EmbeddingProviderKind};
pub use ingest_config::IngestConfig;
pub use retrieval_config::RetrievalConfig;
pub use storage_config::StorageConfig;
pub use vector_config::VectorConfig;

use crate::errors::{MnemoError, MnemoResult};

/// Top-level configuration for a mnemo runtime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MnemoConfig {
    pub storage: StorageConfig,
    pub vector: VectorConfig,
    pub embedding: EmbeddingConfig,
    pub retrieval: RetrievalConfig,
    pub ingest: IngestConfig,
}

impl MnemoConfig {
    /// Parse from a TOML string and validate.
    pub fn from_toml(toml_str: &str) -> MnemoResult<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| MnemoError::ConfigError(format!("<string>: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file and validate.
    pub fn load(path: &Path) -> MnemoResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MnemoError::ConfigError(format!("{}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| MnemoError::ConfigError(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no component can run with.
    pub fn validate(&self) -> MnemoResult<()> {
        fn invalid(field: &str, message: &str) -> MnemoResult<()> {
            Err(MnemoError::ConfigError(format!("{field}: {message}")))
        }

        if self.embedding.dimensions == 0 {
            return invalid("embedding.dimensions", "must be greater than 0");
        }
        if self.retrieval.default_limit == 0 {
            return invalid("retrieval.default_limit", "must be greater than 0");
        }
        if self.retrieval.fused_limit == 0 {
            return invalid("retrieval.fused_limit", "must be greater than 0");
        }
        if !(0.0..=1.0).contains(&self.retrieval.fusion_boost) {
            return invalid("retrieval.fusion_boost", "must be between 0.0 and 1.0");
        }
        if !(0.0..=1.0).contains(&self.retrieval.structural_score) {
            return invalid("retrieval.structural_score", "must be between 0.0 and 1.0");
        }
        if self.retrieval.max_traversal_nodes == 0 {
            return invalid("retrieval.max_traversal_nodes", "must be greater than 0");
        }
        if self.embedding.provider == EmbeddingProviderKind::Azure
            && (self.embedding.endpoint.is_none() || self.embedding.deployment.is_none())
        {
            return invalid("embedding", "azure provider needs endpoint and deployment");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_all_defaults() {
        let config = MnemoConfig::from_toml("").unwrap();
        assert_eq!(config, MnemoConfig::default());
        assert_eq!(config.embedding.dimensions, 1536);
        assert_eq!(config.retrieval.default_depth, 2);
        assert_eq!(config.ingest.preview_chars, 200);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = MnemoConfig::from_toml(
            r#"
            [retrieval]
            fused_limit = 3

            [embedding]
            provider = "openai"
            api_key = "k"
            "#,
        )
        .unwrap();
        assert_eq!(config.retrieval.fused_limit, 3);
        assert_eq!(config.retrieval.default_limit, 5);
        assert_eq!(config.embedding.provider, EmbeddingProviderKind::OpenAi);
        assert_eq!(config.embedding.model, "text-embedding-ada-002");
    }

    #[test]
    fn validation_rejects_bad_values() {
        assert!(MnemoConfig::from_toml("[embedding]\ndimensions = 0").is_err());
        assert!(MnemoConfig::from_toml("[retrieval]\nfusion_boost = 1.5").is_err());
        assert!(MnemoConfig::from_toml("[embedding]\nprovider = \"azure\"").is_err());
        assert!(MnemoConfig::from_toml("not toml [").is_err());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mnemo.toml");
        std::fs::write(&path, "[storage]\ndb_path = \"x.db\"\n").unwrap();
        let config = MnemoConfig::load(&path).unwrap();
        assert_eq!(config.storage.db_path, "x.db");
        assert!(MnemoConfig::load(&dir.path().join("missing.toml")).is_err());
    }
}
