use super::{
    EmbeddingError, ExchangeError, IngestError, RetrievalError, StorageError, VectorError,
};

/// Top-level error for every mnemo operation.
#[derive(Debug, thiserror::Error)]
pub enum MnemoError {
    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("vector index error: {0}")]
    VectorError(#[from] VectorError),

    #[error("ingest error: {0}")]
    IngestError(#[from] IngestError),

    #[error("retrieval error: {0}")]
    RetrievalError(#[from] RetrievalError),

    #[error("exchange error: {0}")]
    ExchangeError(#[from] ExchangeError),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type MnemoResult<T> = Result<T, MnemoError>;
