use crate::intent::{IntentScores, QueryIntent};

/// Scores a free-text query per routing category.
pub trait IntentClassifier: Send + Sync {
    fn score(&self, query: &str) -> IntentScores;

    fn classify(&self, query: &str) -> QueryIntent {
        self.score(query).decide()
    }
}
