//! Fallback chain for embedding generation.
//!
//! Providers are tried in order; the chain always ends with the
//! deterministic code-point embedding, so it cannot fail. Every fall-through
//! is logged and recorded as a degradation event.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use mnemo_core::errors::EmbeddingError;
use mnemo_core::traits::EmbeddingProvider;

use crate::providers::CharCodeEmbedding;

/// Most recent events kept in memory.
const MAX_EVENTS: usize = 256;

/// One fall-through from a failing provider to the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradationEvent {
    pub component: String,
    pub failure: String,
    pub fallback_used: String,
    pub timestamp: DateTime<Utc>,
}

/// Ordered providers plus the terminal fallback.
pub struct DegradationChain {
    chain: Vec<Box<dyn EmbeddingProvider>>,
    fallback: CharCodeEmbedding,
    events: Mutex<Vec<DegradationEvent>>,
}

impl DegradationChain {
    /// A chain that only has the fallback.
    pub fn new(dimensions: usize) -> Self {
        Self {
            chain: Vec::new(),
            fallback: CharCodeEmbedding::new(dimensions),
            events: Mutex::new(Vec::new()),
        }
    }

    /// Add a provider ahead of the fallback, after any already pushed.
    pub fn push(&mut self, provider: Box<dyn EmbeddingProvider>) {
        self.chain.push(provider);
    }

    pub fn dimensions(&self) -> usize {
        self.fallback.dimensions()
    }

    /// True when `provider` names the terminal fallback.
    pub fn is_fallback(&self, provider: &str) -> bool {
        provider == self.fallback.name()
    }

    /// Name of the first available provider.
    pub fn active_provider_name(&self) -> &str {
        self.chain
            .iter()
            .find(|p| p.is_available())
            .map(|p| p.name())
            .unwrap_or_else(|| self.fallback.name())
    }

    /// Embed with the first provider that succeeds. Returns the vector and
    /// the name of the provider that produced it.
    pub async fn embed(&self, text: &str) -> (Vec<f32>, String) {
        for provider in &self.chain {
            if !provider.is_available() {
                continue;
            }
            match provider.embed(text).await {
                Ok(vector) if vector.len() == self.dimensions() => {
                    return (vector, provider.name().to_string());
                }
                Ok(vector) => {
                    let mismatch = EmbeddingError::DimensionMismatch {
                        expected: self.dimensions(),
                        actual: vector.len(),
                    };
                    self.record(provider.name(), &mismatch.to_string());
                }
                Err(e) => self.record(provider.name(), &e.to_string()),
            }
        }
        (self.fallback.vector(text), self.fallback.name().to_string())
    }

    /// Batch form of [`embed`](Self::embed). A failing provider fails the
    /// whole batch over to the next one.
    pub async fn embed_batch(&self, texts: &[String]) -> (Vec<Vec<f32>>, String) {
        for provider in &self.chain {
            if !provider.is_available() {
                continue;
            }
            match provider.embed_batch(texts).await {
                Ok(vectors)
                    if vectors.len() == texts.len()
                        && vectors.iter().all(|v| v.len() == self.dimensions()) =>
                {
                    return (vectors, provider.name().to_string());
                }
                Ok(_) => self.record(provider.name(), "batch shape mismatch"),
                Err(e) => self.record(provider.name(), &e.to_string()),
            }
        }
        let vectors = texts.iter().map(|t| self.fallback.vector(t)).collect();
        (vectors, self.fallback.name().to_string())
    }

    /// Recorded degradation events, oldest first.
    pub fn events(&self) -> Vec<DegradationEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    fn record(&self, provider: &str, failure: &str) {
        let next = self
            .chain
            .iter()
            .skip_while(|p| p.name() != provider)
            .skip(1)
            .find(|p| p.is_available())
            .map(|p| p.name())
            .unwrap_or_else(|| self.fallback.name())
            .to_string();
        warn!(
            event = "embedding_degraded",
            provider,
            error = failure,
            fallback = %next,
            "provider failed, trying next in chain"
        );
        if let Ok(mut events) = self.events.lock() {
            if events.len() >= MAX_EVENTS {
                events.remove(0);
            }
            events.push(DegradationEvent {
                component: "embeddings".to_string(),
                failure: format!("{provider}: {failure}"),
                fallback_used: next,
                timestamp: Utc::now(),
            });
        }
    }
}
