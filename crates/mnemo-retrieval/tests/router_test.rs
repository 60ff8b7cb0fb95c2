//! QueryRouter end to end over memories stored through the coordinator.

use std::sync::Arc;

use mnemo_core::config::{IngestConfig, RetrievalConfig};
use mnemo_core::properties::props_from;
use mnemo_core::QueryIntent;
use mnemo_embeddings::EmbeddingEngine;
use mnemo_ingest::{IngestionCoordinator, LexicalExtractor};
use mnemo_retrieval::{
    KeywordClassifier, QueryOptions, QueryResults, QueryRouter, ResultOrigin, StructuralResults,
};
use mnemo_storage::GraphStore;
use mnemo_vector::VectorIndex;

struct Harness {
    coordinator: IngestionCoordinator,
    router: QueryRouter,
}

fn make_harness() -> Harness {
    let vectors = Arc::new(VectorIndex::in_memory(Arc::new(
        EmbeddingEngine::fallback_only(64),
    )));
    let graph = Arc::new(GraphStore::open_in_memory().unwrap());
    Harness {
        coordinator: IngestionCoordinator::new(
            vectors.clone(),
            graph.clone(),
            Arc::new(LexicalExtractor),
            IngestConfig::default(),
        ),
        router: QueryRouter::new(
            vectors,
            graph,
            Arc::new(KeywordClassifier),
            RetrievalConfig::default(),
        ),
    }
}

async fn seed(h: &Harness) {
    h.coordinator
        .store(
            "function processData(rows) { return rows; }\nrequire('lodash')",
            props_from([("type", "code"), ("file_path", "src/data.js")]),
        )
        .await
        .unwrap();
    h.coordinator
        .store(
            "function login(user, pass) { return check(user, pass); }",
            props_from([("type", "code"), ("file_path", "src/auth/login.js")]),
        )
        .await
        .unwrap();
    h.coordinator
        .store("用户认证使用 JWT 令牌", props_from([("topic", "auth")]))
        .await
        .unwrap();
}

// ── Routing ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn who_calls_routes_structural_and_finds_function() {
    let h = make_harness();
    seed(&h).await;

    let response = h
        .router
        .route("谁调用了 processData", &QueryOptions::default())
        .await
        .unwrap();
    assert_eq!(response.intent, QueryIntent::Structural);
    let QueryResults::Structural(StructuralResults::Entities(matches)) = &response.results else {
        panic!("expected entity matches");
    };
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].entity.entity_id, "file:src/data.js:function:processData");
    assert_eq!(matches[0].relationships.len(), 1);
    assert_eq!(matches[0].relationships[0].relationship.rel_type, "CONTAINS");
}

#[tokio::test]
async fn how_to_routes_semantic() {
    let h = make_harness();
    seed(&h).await;

    let response = h
        .router
        .route("如何实现用户认证", &QueryOptions::default().with_limit(2))
        .await
        .unwrap();
    assert_eq!(response.intent, QueryIntent::Semantic);
    let QueryResults::Semantic(results) = &response.results else {
        panic!("expected semantic results");
    };
    assert_eq!(results.len(), 2);
    assert!(results.scores.windows(2).all(|w| w[0] >= w[1]));
    assert!(response.semantic.is_none());
}

#[tokio::test]
async fn semantic_filter_applies() {
    let h = make_harness();
    seed(&h).await;

    let options = QueryOptions::default()
        .with_intent(QueryIntent::Semantic)
        .with_filter(props_from([("topic", "auth")]));
    let response = h.router.route("anything", &options).await.unwrap();
    let QueryResults::Semantic(results) = &response.results else {
        panic!("expected semantic results");
    };
    assert_eq!(results.documents, vec!["用户认证使用 JWT 令牌".to_string()]);
}

#[tokio::test]
async fn entity_id_traverses() {
    let h = make_harness();
    seed(&h).await;

    let options = QueryOptions::default()
        .with_intent(QueryIntent::Structural)
        .with_entity("file:src/data.js")
        .with_depth(1);
    let response = h.router.route("ignored", &options).await.unwrap();
    let QueryResults::Structural(StructuralResults::Traversal(edges)) = &response.results else {
        panic!("expected traversal");
    };
    let mut types: Vec<&str> = edges.iter().map(|e| e.rel_type.as_str()).collect();
    types.sort();
    assert_eq!(types, vec!["CONTAINS", "HAS_MEMORY", "IMPORTS"]);

    let only_imports = options.clone().with_relationship_type("IMPORTS");
    let response = h.router.route("ignored", &only_imports).await.unwrap();
    let QueryResults::Structural(StructuralResults::Traversal(edges)) = &response.results else {
        panic!("expected traversal");
    };
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].to_id, "import:lodash");
}

// ── Hybrid ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn hybrid_fuses_file_hits() {
    let h = make_harness();
    seed(&h).await;

    let response = h
        .router
        .route("login.js 相关的代码", &QueryOptions::default())
        .await
        .unwrap();
    assert_eq!(response.intent, QueryIntent::Hybrid);
    assert!(response.semantic.is_some());
    assert!(response.structural.is_some());

    let fused = response.fused().unwrap();
    assert!(fused.len() <= 10);
    assert!(fused.windows(2).all(|w| w[0].score >= w[1].score));

    let boosted = fused
        .iter()
        .find(|r| r.content.contains("function login"))
        .unwrap();
    assert_eq!(boosted.origin, ResultOrigin::Semantic);
    assert!(boosted.relationships.is_some());
    assert!(!fused.iter().any(|r| r.origin == ResultOrigin::Structural && r.content == "login.js"));
}

#[tokio::test]
async fn hybrid_plain_words_match_no_entities() {
    let h = make_harness();
    h.coordinator
        .store(
            "function toString() {}\nfunction install() {}\nfunction protocol() {}",
            props_from([("type", "code"), ("file_path", "src/util.js")]),
        )
        .await
        .unwrap();

    let response = h
        .router
        .route(
            "find everything related to payments",
            &QueryOptions::default().with_intent(QueryIntent::Hybrid),
        )
        .await
        .unwrap();
    assert!(response.structural.as_ref().unwrap().is_empty());
    let fused = response.fused().unwrap();
    assert!(!fused.is_empty());
    assert!(fused.iter().all(|r| r.origin == ResultOrigin::Semantic));
}

#[tokio::test]
async fn hybrid_response_serializes_as_envelope() {
    let h = make_harness();
    seed(&h).await;

    let response = h
        .router
        .route("xyzzy", &QueryOptions::default())
        .await
        .unwrap();
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["type"], "hybrid");
    assert_eq!(json["query"], "xyzzy");
    assert!(json["results"].is_array());
    assert!(json["semantic"]["scores"].is_array());
}

#[tokio::test]
async fn zero_limit_is_rejected() {
    let h = make_harness();
    let err = h
        .router
        .route("how to", &QueryOptions::default().with_limit(0))
        .await;
    assert!(err.is_err());
}
