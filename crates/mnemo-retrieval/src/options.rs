use serde::{Deserialize, Serialize};

use mnemo_core::{Properties, QueryIntent};

/// Per-query options. Unset fields fall back to `RetrievalConfig`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    /// Semantic result count.
    pub limit: Option<usize>,
    /// Exact-match metadata filter for the semantic leg.
    pub filter: Properties,
    /// Start a traversal here instead of searching by name.
    pub entity_id: Option<String>,
    /// Restrict name search to one entity type.
    pub entity_type: Option<String>,
    /// Restrict traversal to one relationship type.
    pub relationship_type: Option<String>,
    pub depth: Option<usize>,
    /// Skip classification and route this way.
    pub intent: Option<QueryIntent>,
}

impl QueryOptions {
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_filter(mut self, filter: Properties) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_entity(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    pub fn with_entity_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self
    }

    pub fn with_relationship_type(mut self, relationship_type: impl Into<String>) -> Self {
        self.relationship_type = Some(relationship_type.into());
        self
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn with_intent(mut self, intent: QueryIntent) -> Self {
        self.intent = Some(intent);
        self
    }
}
