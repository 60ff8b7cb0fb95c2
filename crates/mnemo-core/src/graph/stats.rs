use serde::{Deserialize, Serialize};

/// Entity count for one type tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub entity_type: String,
    pub count: usize,
}

/// Aggregate counts over the graph store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub entities: usize,
    pub relationships: usize,
    pub types: Vec<TypeCount>,
}
