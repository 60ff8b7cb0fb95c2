//! # mnemo-retrieval
//!
//! Routes a free-text query to semantic search, structural search, or
//! both, and fuses the hybrid case into one ranked list.

pub mod fusion;
pub mod intent;
pub mod options;
pub mod results;
pub mod router;
pub mod search;

pub use fusion::fuse;
pub use intent::KeywordClassifier;
pub use options::QueryOptions;
pub use results::{
    EntityMatch, FusedResult, QueryResponse, QueryResults, ResultOrigin, ResultSource,
    SemanticResults, StructuralResults,
};
pub use router::QueryRouter;
