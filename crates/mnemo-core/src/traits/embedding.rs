use async_trait::async_trait;

use crate::errors::MnemoResult;

/// Embedding generation provider.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text, returning a vector of floats.
    async fn embed(&self, text: &str) -> MnemoResult<Vec<f32>>;

    /// Embed a batch of texts. The default embeds one at a time.
    async fn embed_batch(&self, texts: &[String]) -> MnemoResult<Vec<Vec<f32>>> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.embed(text).await?);
        }
        Ok(out)
    }

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Whether this provider is currently available.
    fn is_available(&self) -> bool;
}
