//! Query result envelope and the per-leg result shapes.

use serde::Serialize;

use mnemo_core::graph::{Entity, Relationship, RelationshipView};
use mnemo_core::{Properties, QueryIntent};

/// Semantic hits, nearest first. `scores` are cosine similarities.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SemanticResults {
    pub ids: Vec<String>,
    pub documents: Vec<String>,
    pub metadatas: Vec<Properties>,
    pub scores: Vec<f32>,
}

impl SemanticResults {
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// One name-search hit and every edge touching it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityMatch {
    pub entity: Entity,
    pub relationships: Vec<RelationshipView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StructuralResults {
    /// Edges reached from a caller-supplied entity id.
    Traversal(Vec<Relationship>),
    /// Entities found by name, each with its edges.
    Entities(Vec<EntityMatch>),
}

impl StructuralResults {
    pub fn len(&self) -> usize {
        match self {
            Self::Traversal(edges) => edges.len(),
            Self::Entities(matches) => matches.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entity hits; empty for a traversal.
    pub fn entities(&self) -> &[EntityMatch] {
        match self {
            Self::Traversal(_) => &[],
            Self::Entities(matches) => matches,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultSource {
    Vector,
    Graph,
}

/// Which leg first produced a fused record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultOrigin {
    Semantic,
    Structural,
}

/// One record of the fused hybrid list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FusedResult {
    #[serde(rename = "type")]
    pub origin: ResultOrigin,
    pub source: ResultSource,
    pub content: String,
    pub metadata: Properties,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Vec<RelationshipView>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryResults {
    Semantic(SemanticResults),
    Structural(StructuralResults),
    Hybrid(Vec<FusedResult>),
}

/// `{type, query, results}`; hybrid responses also carry both raw legs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResponse {
    #[serde(rename = "type")]
    pub intent: QueryIntent,
    pub query: String,
    pub results: QueryResults,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic: Option<SemanticResults>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structural: Option<StructuralResults>,
}

impl QueryResponse {
    pub fn fused(&self) -> Option<&[FusedResult]> {
        match &self.results {
            QueryResults::Hybrid(fused) => Some(fused),
            _ => None,
        }
    }
}
