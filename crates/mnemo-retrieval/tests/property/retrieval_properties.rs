//! Property tests for fusion and intent classification.

use chrono::Utc;
use proptest::prelude::*;

use mnemo_core::config::RetrievalConfig;
use mnemo_core::graph::Entity;
use mnemo_core::properties::props_from;
use mnemo_core::traits::IntentClassifier;
use mnemo_core::{IntentScores, Properties, QueryIntent};
use mnemo_retrieval::{fuse, EntityMatch, KeywordClassifier, SemanticResults, StructuralResults};

fn file_hit(path: &str) -> EntityMatch {
    let now = Utc::now();
    EntityMatch {
        entity: Entity {
            entity_id: format!("file:{path}"),
            entity_type: "File".to_string(),
            name: path.to_string(),
            properties: Properties::new(),
            created_at: now,
            updated_at: now,
        },
        relationships: Vec::new(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn shared_key_score_is_boosted_and_capped(score in 0.0f32..=1.0) {
        let semantic = SemanticResults {
            ids: vec!["m".into()],
            documents: vec!["doc".into()],
            metadatas: vec![props_from([("file_path", "a.js")])],
            scores: vec![score],
        };
        let structural = StructuralResults::Entities(vec![file_hit("a.js")]);
        let fused = fuse(&semantic, &structural, &RetrievalConfig::default());
        prop_assert_eq!(fused.len(), 1);
        let expected = (score as f64 + 0.2).min(1.0);
        prop_assert!((fused[0].score - expected).abs() < 1e-9);
    }

    #[test]
    fn fused_list_is_sorted_and_bounded(
        scores in prop::collection::vec(0.0f32..=1.0, 0..30),
        files in prop::collection::vec("[a-z]{1,6}", 0..8),
    ) {
        let semantic = SemanticResults {
            ids: scores.iter().enumerate().map(|(i, _)| format!("m{i}")).collect(),
            documents: scores.iter().enumerate().map(|(i, _)| format!("d{i}")).collect(),
            metadatas: scores.iter().map(|_| Properties::new()).collect(),
            scores: scores.clone(),
        };
        let structural = StructuralResults::Entities(files.iter().map(|f| file_hit(f)).collect());
        let config = RetrievalConfig::default();
        let fused = fuse(&semantic, &structural, &config);
        prop_assert!(fused.len() <= config.fused_limit);
        prop_assert!(fused.windows(2).all(|w| w[0].score >= w[1].score));
        prop_assert!(fused.iter().all(|r| r.score <= 1.0));
    }

    #[test]
    fn classification_is_deterministic(query in "\\PC{0,40}") {
        let c = KeywordClassifier;
        prop_assert_eq!(c.score(&query), c.score(&query));
        prop_assert_eq!(c.classify(&query), c.classify(&query));
    }

    #[test]
    fn near_ties_always_route_hybrid(
        structural in 0u32..20,
        semantic in 0u32..20,
        hybrid in 0u32..20,
    ) {
        let scores = IntentScores { structural, semantic, hybrid };
        let intent = scores.decide();
        let mut all = [structural, semantic, hybrid];
        if all == [0, 0, 0] {
            all[1] = 1;
        }
        let max = *all.iter().max().unwrap();
        let close = all.iter().filter(|s| **s + 1 >= max).count();
        if close > 1 {
            prop_assert_eq!(intent, QueryIntent::Hybrid);
        } else {
            let winner = match all.iter().position(|s| *s == max).unwrap() {
                0 => QueryIntent::Structural,
                1 => QueryIntent::Semantic,
                _ => QueryIntent::Hybrid,
            };
            prop_assert_eq!(intent, winner);
        }
    }
}
