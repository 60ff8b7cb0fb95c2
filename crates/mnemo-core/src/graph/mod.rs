//! Entity and relationship types for the structural graph.

mod entity;
mod relationship;
mod stats;

pub use entity::{Entity, NewEntity};
pub use relationship::{EndpointSummary, NewRelationship, Relationship, RelationshipView};
pub use stats::{GraphStats, TypeCount};
