use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::properties::Properties;

/// A stored directed edge. `(from_id, to_id, rel_type)` is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub from_id: String,
    pub to_id: String,
    #[serde(rename = "type")]
    pub rel_type: String,
    #[serde(default)]
    pub properties: Properties,
    pub created_at: DateTime<Utc>,
}

impl Relationship {
    /// The endpoint opposite `id`, treating the edge as undirected.
    pub fn other_end(&self, id: &str) -> &str {
        if self.from_id == id {
            &self.to_id
        } else {
            &self.from_id
        }
    }

    pub fn key(&self) -> (&str, &str, &str) {
        (&self.from_id, &self.to_id, &self.rel_type)
    }
}

/// Input for a relationship upsert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRelationship {
    pub from_id: String,
    pub to_id: String,
    #[serde(rename = "type")]
    pub rel_type: String,
    #[serde(default)]
    pub properties: Properties,
}

impl NewRelationship {
    pub fn new(
        from_id: impl Into<String>,
        to_id: impl Into<String>,
        rel_type: impl Into<String>,
        properties: Properties,
    ) -> Self {
        Self {
            from_id: from_id.into(),
            to_id: to_id.into(),
            rel_type: rel_type.into(),
            properties,
        }
    }
}

impl From<Relationship> for NewRelationship {
    fn from(r: Relationship) -> Self {
        Self {
            from_id: r.from_id,
            to_id: r.to_id,
            rel_type: r.rel_type,
            properties: r.properties,
        }
    }
}

/// Type, name, and properties of one relationship endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointSummary {
    #[serde(rename = "type")]
    pub entity_type: String,
    pub name: String,
    #[serde(default)]
    pub properties: Properties,
}

/// A relationship enriched with both endpoints. An endpoint is `None`
/// when the referenced entity no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipView {
    #[serde(flatten)]
    pub relationship: Relationship,
    pub from: Option<EndpointSummary>,
    pub to: Option<EndpointSummary>,
}
