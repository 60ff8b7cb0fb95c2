mod classifier;

pub use classifier::KeywordClassifier;
