//! # mnemo-embeddings
//!
//! Text → vector. A configured HTTP provider heads a degradation chain
//! that always ends at a deterministic local embedding, so callers never
//! see a provider failure. Results are cached by content hash.

pub mod degradation;
pub mod engine;
pub mod providers;

pub use degradation::{DegradationChain, DegradationEvent};
pub use engine::EmbeddingEngine;
pub use providers::{CharCodeEmbedding, HttpEmbeddingProvider};
