//! # mnemo-vector
//!
//! In-process vector index: four parallel columns (ids, documents,
//! embeddings, metadatas), brute-force cosine search, and a whole-table
//! JSON snapshot rewritten atomically after every mutation.

pub mod index;
pub mod similarity;
pub mod snapshot;
pub mod table;

pub use index::{IndexStatus, VectorIndex, VectorQueryResult, VectorRecord};
pub use table::VectorTable;
