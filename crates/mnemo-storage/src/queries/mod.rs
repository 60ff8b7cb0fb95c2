//! SQL for each graph operation. Every function takes a borrowed
//! connection so callers choose the reader, the writer, or a transaction.

pub mod batch;
pub mod entity_ops;
pub mod relationship_ops;
pub(crate) mod rows;
pub mod stats;
