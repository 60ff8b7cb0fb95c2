//! The two retrieval legs.

pub mod semantic;
pub mod structural;
