//! Keyed-map fusion of the semantic and structural legs.
//!
//! A semantic hit is keyed by the File entity id of its `file_path`, or by
//! position when it has none. A structural entity hit with the same key
//! boosts that record; otherwise it enters at a fixed score. The map keeps
//! first-insertion order, so equal scores stay in the order they arrived.

use std::collections::HashMap;

use mnemo_core::config::RetrievalConfig;
use mnemo_core::memory::{file_entity_id, file_path};

use crate::results::{
    FusedResult, ResultOrigin, ResultSource, SemanticResults, StructuralResults,
};

/// Fusion key of the semantic hit at `index`.
pub fn semantic_key(results: &SemanticResults, index: usize) -> String {
    results
        .metadatas
        .get(index)
        .and_then(file_path)
        .map(file_entity_id)
        .unwrap_or_else(|| format!("doc_{index}"))
}

#[derive(Default)]
struct FusionMap {
    index: HashMap<String, usize>,
    records: Vec<FusedResult>,
}

impl FusionMap {
    fn get_mut(&mut self, key: &str) -> Option<&mut FusedResult> {
        let i = *self.index.get(key)?;
        self.records.get_mut(i)
    }

    /// Insert or overwrite in place; an overwrite keeps the original position.
    fn set(&mut self, key: String, record: FusedResult) {
        match self.index.get(&key) {
            Some(&i) => self.records[i] = record,
            None => {
                self.index.insert(key, self.records.len());
                self.records.push(record);
            }
        }
    }
}

/// Merge both legs into one list, highest score first, at most
/// `config.fused_limit` long.
pub fn fuse(
    semantic: &SemanticResults,
    structural: &StructuralResults,
    config: &RetrievalConfig,
) -> Vec<FusedResult> {
    let mut map = FusionMap::default();

    for (i, document) in semantic.documents.iter().enumerate() {
        map.set(
            semantic_key(semantic, i),
            FusedResult {
                origin: ResultOrigin::Semantic,
                source: ResultSource::Vector,
                content: document.clone(),
                metadata: semantic.metadatas.get(i).cloned().unwrap_or_default(),
                score: semantic.scores.get(i).copied().unwrap_or(0.0) as f64,
                relationships: None,
            },
        );
    }

    for hit in structural.entities() {
        let key = hit.entity.entity_id.as_str();
        match map.get_mut(key) {
            Some(existing) => {
                existing.relationships = Some(hit.relationships.clone());
                existing.score = (existing.score + config.fusion_boost).min(1.0);
            }
            None => map.set(
                key.to_string(),
                FusedResult {
                    origin: ResultOrigin::Structural,
                    source: ResultSource::Graph,
                    content: hit.entity.name.clone(),
                    metadata: hit.entity.properties.clone(),
                    score: config.structural_score,
                    relationships: Some(hit.relationships.clone()),
                },
            ),
        }
    }

    let mut fused = map.records;
    fused.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    fused.truncate(config.fused_limit);
    fused
}
