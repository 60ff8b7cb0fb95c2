use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::properties::Properties;

/// A stored graph node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub entity_id: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub name: String,
    #[serde(default)]
    pub properties: Properties,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for an entity upsert. Also the shape accepted by import, so
/// exported rows deserialize into it with their timestamps ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEntity {
    pub entity_id: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub name: String,
    #[serde(default)]
    pub properties: Properties,
}

impl NewEntity {
    pub fn new(
        entity_id: impl Into<String>,
        entity_type: impl Into<String>,
        name: impl Into<String>,
        properties: Properties,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            entity_type: entity_type.into(),
            name: name.into(),
            properties,
        }
    }
}

impl From<Entity> for NewEntity {
    fn from(e: Entity) -> Self {
        Self {
            entity_id: e.entity_id,
            entity_type: e.entity_type,
            name: e.name,
            properties: e.properties,
        }
    }
}
