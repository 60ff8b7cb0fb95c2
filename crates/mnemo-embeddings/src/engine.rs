//! EmbeddingEngine: the entry point for the vector index.
//!
//! A blake3-keyed in-memory cache in front of the degradation chain.
//! Fallback vectors are never cached.
//! `embed` never fails; provider trouble degrades to the local fallback.

use std::sync::Arc;

use async_trait::async_trait;
use moka::sync::Cache;
use tracing::{debug, info};

use mnemo_core::config::EmbeddingConfig;
use mnemo_core::errors::MnemoResult;
use mnemo_core::traits::EmbeddingProvider;

use crate::degradation::{DegradationChain, DegradationEvent};
use crate::providers;

pub struct EmbeddingEngine {
    chain: DegradationChain,
    cache: Cache<String, Arc<Vec<f32>>>,
}

impl EmbeddingEngine {
    /// Build the chain from configuration.
    pub fn new(config: &EmbeddingConfig) -> Self {
        let mut chain = DegradationChain::new(config.dimensions);
        if let Some(primary) = providers::create_primary(config) {
            chain.push(primary);
        }
        let engine = Self::with_chain(chain, config.cache_size);
        info!(
            provider = engine.chain.active_provider_name(),
            dims = config.dimensions,
            "EmbeddingEngine initialized"
        );
        engine
    }

    /// Wrap an already-assembled chain.
    pub fn with_chain(chain: DegradationChain, cache_size: u64) -> Self {
        Self {
            chain,
            cache: Cache::new(cache_size),
        }
    }

    /// Fallback-only engine.
    pub fn fallback_only(dimensions: usize) -> Self {
        Self::with_chain(DegradationChain::new(dimensions), 1_000)
    }

    fn cache_key(text: &str) -> String {
        blake3::hash(text.as_bytes()).to_hex().to_string()
    }

    /// Embed one text. Cached by content hash.
    pub async fn embed_text(&self, text: &str) -> Vec<f32> {
        let key = Self::cache_key(text);
        if let Some(hit) = self.cache.get(&key) {
            debug!(hash = %key, "embedding cache hit");
            return hit.as_ref().clone();
        }
        let (vector, provider) = self.chain.embed(text).await;
        debug!(hash = %key, provider = %provider, "embedding generated");
        if !self.chain.is_fallback(&provider) {
            self.cache.insert(key, Arc::new(vector.clone()));
        }
        vector
    }

    /// Embed several texts, reusing cached vectors and batching the rest.
    pub async fn embed_texts(&self, texts: &[String]) -> Vec<Vec<f32>> {
        let keys: Vec<String> = texts.iter().map(|t| Self::cache_key(t)).collect();
        let mut out: Vec<Option<Vec<f32>>> = keys
            .iter()
            .map(|k| self.cache.get(k).map(|v| v.as_ref().clone()))
            .collect();

        let missing: Vec<usize> = (0..texts.len()).filter(|i| out[*i].is_none()).collect();
        if !missing.is_empty() {
            let batch: Vec<String> = missing.iter().map(|i| texts[*i].clone()).collect();
            let (vectors, provider) = self.chain.embed_batch(&batch).await;
            debug!(count = vectors.len(), provider = %provider, "embedding batch generated");
            let cacheable = !self.chain.is_fallback(&provider);
            for (i, vector) in missing.into_iter().zip(vectors) {
                if cacheable {
                    self.cache.insert(keys[i].clone(), Arc::new(vector.clone()));
                }
                out[i] = Some(vector);
            }
        }

        let dims = self.chain.dimensions();
        out.into_iter()
            .map(|v| v.unwrap_or_else(|| vec![0.0; dims]))
            .collect()
    }

    pub fn active_provider_name(&self) -> &str {
        self.chain.active_provider_name()
    }

    pub fn degradation_events(&self) -> Vec<DegradationEvent> {
        self.chain.events()
    }
}

#[async_trait]
impl EmbeddingProvider for EmbeddingEngine {
    async fn embed(&self, text: &str) -> MnemoResult<Vec<f32>> {
        Ok(self.embed_text(text).await)
    }

    async fn embed_batch(&self, texts: &[String]) -> MnemoResult<Vec<Vec<f32>>> {
        Ok(self.embed_texts(texts).await)
    }

    fn dimensions(&self) -> usize {
        self.chain.dimensions()
    }

    fn name(&self) -> &str {
        "embedding-engine"
    }

    fn is_available(&self) -> bool {
        true
    }
}
