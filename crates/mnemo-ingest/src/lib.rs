//! # mnemo-ingest
//!
//! Turns a stored memory into a vector row plus, for file-backed and code
//! memories, a small graph: File, Memory, and whatever the structure
//! extractor finds in the source.

pub mod coordinator;
pub mod extraction;
pub mod ids;

pub use coordinator::IngestionCoordinator;
pub use extraction::LexicalExtractor;
