use serde::{Deserialize, Serialize};

use crate::graph::{NewEntity, NewRelationship};

/// Graph structure derived from one piece of content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    pub entities: Vec<NewEntity>,
    pub relationships: Vec<NewRelationship>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.relationships.is_empty()
    }
}

/// Derives entities and edges from stored content. Pure: no I/O.
pub trait StructureExtractor: Send + Sync {
    /// Extract structure owned by the File entity for `file_path`.
    fn extract(&self, file_path: &str, content: &str) -> Extraction;

    fn name(&self) -> &str;
}
