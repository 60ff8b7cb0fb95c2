//! Error types. One enum per subsystem, `thiserror` only, rolled up into
//! [`MnemoError`].

mod embedding_error;
mod exchange_error;
mod ingest_error;
mod mnemo_error;
mod retrieval_error;
mod storage_error;
mod vector_error;

pub use embedding_error::EmbeddingError;
pub use exchange_error::ExchangeError;
pub use ingest_error::IngestError;
pub use mnemo_error::{MnemoError, MnemoResult};
pub use retrieval_error::RetrievalError;
pub use storage_error::StorageError;
pub use vector_error::VectorError;
