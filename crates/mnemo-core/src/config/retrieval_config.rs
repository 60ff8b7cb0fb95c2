use serde::{Deserialize, Serialize};

use super::defaults;

/// Query routing and fusion configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Semantic result count when the caller gives none.
    pub default_limit: usize,
    /// Entities kept from a structural name search.
    pub structural_top_k: usize,
    /// Traversal depth when the caller gives none.
    pub default_depth: usize,
    /// Added to a semantic score when a structural hit shares its key.
    pub fusion_boost: f64,
    /// Score of a structural-only fused record.
    pub structural_score: f64,
    /// Length of the fused list.
    pub fused_limit: usize,
    pub max_traversal_nodes: usize,
    pub traversal_timeout_ms: u64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_limit: defaults::DEFAULT_QUERY_LIMIT,
            structural_top_k: defaults::DEFAULT_STRUCTURAL_TOP_K,
            default_depth: defaults::DEFAULT_TRAVERSAL_DEPTH,
            fusion_boost: defaults::DEFAULT_FUSION_BOOST,
            structural_score: defaults::DEFAULT_STRUCTURAL_SCORE,
            fused_limit: defaults::DEFAULT_FUSED_LIMIT,
            max_traversal_nodes: defaults::DEFAULT_MAX_TRAVERSAL_NODES,
            traversal_timeout_ms: defaults::DEFAULT_TRAVERSAL_TIMEOUT_MS,
        }
    }
}
