mod classifier;
mod embedding;
mod extractor;

pub use classifier::IntentClassifier;
pub use embedding::EmbeddingProvider;
pub use extractor::{Extraction, StructureExtractor};
