//! # mnemo-core
//!
//! Foundation crate for the mnemo hybrid retrieval engine.
//! Defines the property map, graph and memory types, traits, errors,
//! config, and constants. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod graph;
pub mod intent;
pub mod memory;
pub mod properties;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::MnemoConfig;
pub use errors::{MnemoError, MnemoResult};
pub use graph::{Entity, NewEntity, NewRelationship, Relationship, RelationshipView};
pub use intent::{IntentScores, QueryIntent};
pub use properties::{Properties, PropertyValue};
