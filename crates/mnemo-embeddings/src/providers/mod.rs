//! Embedding providers and config-driven construction.

mod char_code;
mod http_provider;

pub use char_code::CharCodeEmbedding;
pub use http_provider::{HttpEmbeddingProvider, HttpFlavor};

use mnemo_core::config::{EmbeddingConfig, EmbeddingProviderKind};
use mnemo_core::traits::EmbeddingProvider;

/// Build the primary provider named by the config, if any.
/// `Fallback` yields `None`: the chain's terminal fallback is enough.
pub fn create_primary(config: &EmbeddingConfig) -> Option<Box<dyn EmbeddingProvider>> {
    match config.provider {
        EmbeddingProviderKind::Fallback => None,
        EmbeddingProviderKind::OpenAi | EmbeddingProviderKind::Azure => {
            match HttpEmbeddingProvider::from_config(config) {
                Ok(provider) => Some(Box::new(provider)),
                Err(e) => {
                    tracing::warn!(
                        event = "embedding_provider_unconfigured",
                        error = %e,
                        "primary embedding provider could not be built"
                    );
                    None
                }
            }
        }
    }
}
