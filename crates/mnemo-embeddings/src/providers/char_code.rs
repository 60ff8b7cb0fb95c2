//! Deterministic code-point embedding.
//!
//! Each character's code point, scaled down, is added into slot
//! `index mod dimensions`. Same text, same vector. Carries no semantics;
//! it only keeps the index queryable without a real provider.

use async_trait::async_trait;

use mnemo_core::constants::FALLBACK_CODE_POINT_SCALE;
use mnemo_core::errors::MnemoResult;
use mnemo_core::traits::EmbeddingProvider;

pub struct CharCodeEmbedding {
    dimensions: usize,
}

impl CharCodeEmbedding {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    /// The embedding itself. Infallible.
    pub fn vector(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; self.dimensions];
        for (i, c) in text.chars().enumerate() {
            v[i % self.dimensions] += c as u32 as f32 / FALLBACK_CODE_POINT_SCALE;
        }
        v
    }
}

#[async_trait]
impl EmbeddingProvider for CharCodeEmbedding {
    async fn embed(&self, text: &str) -> MnemoResult<Vec<f32>> {
        Ok(self.vector(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "char-code"
    }

    fn is_available(&self) -> bool {
        true
    }
}
