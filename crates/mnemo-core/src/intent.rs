//! Query intent: how a free-text query is routed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Routing decision for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryIntent {
    Semantic,
    Structural,
    Hybrid,
}

impl QueryIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Semantic => "semantic",
            Self::Structural => "structural",
            Self::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for QueryIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-category scores produced by a classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentScores {
    pub structural: u32,
    pub semantic: u32,
    pub hybrid: u32,
}

impl IntentScores {
    /// Scores in tie-break order: structural, semantic, hybrid.
    pub fn ordered(&self) -> [(QueryIntent, u32); 3] {
        [
            (QueryIntent::Structural, self.structural),
            (QueryIntent::Semantic, self.semantic),
            (QueryIntent::Hybrid, self.hybrid),
        ]
    }

    /// Decide the intent.
    ///
    /// All-zero scores count as `semantic = 1`. The nominal winner is the
    /// first category at the maximum; if two or more categories sit within
    /// one point of the maximum the query is ambiguous and routes hybrid.
    /// A query with no signal at all therefore lands on hybrid, since the
    /// zero scores sit within one point of the forced `semantic = 1`.
    pub fn decide(mut self) -> QueryIntent {
        if self.structural == 0 && self.semantic == 0 && self.hybrid == 0 {
            self.semantic = 1;
        }
        let ordered = self.ordered();
        let max = ordered.iter().map(|(_, s)| *s).max().unwrap_or(0);
        let close = ordered
            .iter()
            .filter(|(_, s)| *s + 1 >= max)
            .count();
        if close > 1 {
            return QueryIntent::Hybrid;
        }
        ordered
            .iter()
            .find(|(_, s)| *s == max)
            .map(|(intent, _)| *intent)
            .unwrap_or(QueryIntent::Semantic)
    }
}
