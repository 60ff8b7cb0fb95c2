//! GraphStore integration tests: upsert semantics, edge uniqueness,
//! endpoint enrichment, fuzzy search, traversal, stats, bulk import.

use mnemo_core::graph::{NewEntity, NewRelationship};
use mnemo_core::properties::{get_str, props_from};
use mnemo_core::Properties;
use mnemo_storage::{GraphStore, TraversalOptions};

fn make_entity(id: &str, ty: &str, name: &str) -> NewEntity {
    NewEntity::new(id, ty, name, props_from([("origin", "test")]))
}

fn make_edge(from: &str, to: &str, ty: &str) -> NewRelationship {
    NewRelationship::new(from, to, ty, Properties::new())
}

// ── Entities ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_find_entity() {
    let store = GraphStore::open_in_memory().unwrap();
    store
        .create_entity(&make_entity("file:a.js", "File", "a.js"))
        .await
        .unwrap();

    let found = store.find_entity("file:a.js").await.unwrap().unwrap();
    assert_eq!(found.entity_type, "File");
    assert_eq!(found.name, "a.js");
    assert_eq!(get_str(&found.properties, "origin"), Some("test"));
    assert!(store.find_entity("file:missing").await.unwrap().is_none());
}

#[tokio::test]
async fn upsert_replaces_fields_and_bumps_updated_at() {
    let store = GraphStore::open_in_memory().unwrap();
    store
        .create_entity(&NewEntity::new("e1", "Function", "old", props_from([("v", 1i64)])))
        .await
        .unwrap();
    let first = store.find_entity("e1").await.unwrap().unwrap();

    store
        .create_entity(&NewEntity::new("e1", "Class", "new", props_from([("v", 2i64)])))
        .await
        .unwrap();
    let second = store.find_entity("e1").await.unwrap().unwrap();

    assert_eq!(store.stats().await.unwrap().entities, 1);
    assert_eq!(second.entity_type, "Class");
    assert_eq!(second.name, "new");
    assert_eq!(second.properties["v"].as_i64(), Some(2));
    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at > first.updated_at);
}

#[tokio::test]
async fn update_entity_only_touches_existing_rows() {
    let store = GraphStore::open_in_memory().unwrap();
    let missing = NewEntity::new("ghost", "Memory", "x", Properties::new());
    assert!(!store.update_entity(&missing).await.unwrap());
    assert!(store.find_entity("ghost").await.unwrap().is_none());

    store.create_entity(&make_entity("m1", "Memory", "first")).await.unwrap();
    let before = store.find_entity("m1").await.unwrap().unwrap();
    let renamed = NewEntity::new("m1", "Memory", "second", props_from([("k", "v")]));
    assert!(store.update_entity(&renamed).await.unwrap());

    let after = store.find_entity("m1").await.unwrap().unwrap();
    assert_eq!(after.name, "second");
    assert_eq!(get_str(&after.properties, "k"), Some("v"));
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at > before.updated_at);
}

#[tokio::test]
async fn find_by_type_and_delete() {
    let store = GraphStore::open_in_memory().unwrap();
    for (id, ty) in [("f1", "Function"), ("f2", "Function"), ("c1", "Class")] {
        store.create_entity(&make_entity(id, ty, id)).await.unwrap();
    }
    let functions = store.find_entities_by_type("Function").await.unwrap();
    let ids: Vec<_> = functions.iter().map(|e| e.entity_id.as_str()).collect();
    assert_eq!(ids, vec!["f1", "f2"]);

    assert!(store.delete_entity("f1").await.unwrap());
    assert!(!store.delete_entity("f1").await.unwrap());
    assert_eq!(store.find_entities_by_type("Function").await.unwrap().len(), 1);
}

#[tokio::test]
async fn search_matches_substring_with_optional_type() {
    let store = GraphStore::open_in_memory().unwrap();
    store.create_entity(&make_entity("f:1", "Function", "processData")).await.unwrap();
    store.create_entity(&make_entity("c:1", "Class", "DataStore")).await.unwrap();
    store.create_entity(&make_entity("f:2", "Function", "render")).await.unwrap();

    let all = store.search_entities("Data", None).await.unwrap();
    assert_eq!(all.len(), 2);
    let classes = store.search_entities("Data", Some("Class")).await.unwrap();
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].name, "DataStore");
}

#[tokio::test]
async fn search_treats_wildcards_literally() {
    let store = GraphStore::open_in_memory().unwrap();
    store.create_entity(&make_entity("a", "Function", "load_file")).await.unwrap();
    store.create_entity(&make_entity("b", "Function", "loadXfile")).await.unwrap();

    let hits = store.search_entities("_", None).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "load_file");
    assert!(store.search_entities("%", None).await.unwrap().is_empty());
}

// ── Relationships ────────────────────────────────────────────────────────

#[tokio::test]
async fn relationship_triple_is_unique() {
    let store = GraphStore::open_in_memory().unwrap();
    store.create_entity(&make_entity("a", "File", "a")).await.unwrap();
    store.create_entity(&make_entity("b", "Function", "b")).await.unwrap();

    store
        .create_relationship(&NewRelationship::new("a", "b", "CONTAINS", props_from([("n", 1i64)])))
        .await
        .unwrap();
    store
        .create_relationship(&NewRelationship::new("a", "b", "CONTAINS", props_from([("n", 2i64)])))
        .await
        .unwrap();
    store.create_relationship(&make_edge("a", "b", "CALLS")).await.unwrap();

    let stats = store.stats().await.unwrap();
    assert_eq!(stats.relationships, 2);
    let rels = store.all_relationships().await.unwrap();
    let contains = rels.iter().find(|r| r.rel_type == "CONTAINS").unwrap();
    assert_eq!(contains.properties["n"].as_i64(), Some(2));
}

#[tokio::test]
async fn find_relationships_enriches_both_endpoints() {
    let store = GraphStore::open_in_memory().unwrap();
    store.create_entity(&make_entity("file:a.js", "File", "a.js")).await.unwrap();
    store
        .create_entity(&make_entity("file:a.js:function:run", "Function", "run"))
        .await
        .unwrap();
    store
        .create_relationship(&make_edge("file:a.js", "file:a.js:function:run", "CONTAINS"))
        .await
        .unwrap();

    for id in ["file:a.js", "file:a.js:function:run"] {
        let views = store.find_relationships(id).await.unwrap();
        assert_eq!(views.len(), 1);
        let view = &views[0];
        assert_eq!(view.from.as_ref().unwrap().entity_type, "File");
        assert_eq!(view.to.as_ref().unwrap().name, "run");
    }
}

#[tokio::test]
async fn deleting_an_entity_leaves_orphan_edges() {
    let store = GraphStore::open_in_memory().unwrap();
    store.create_entity(&make_entity("a", "File", "a")).await.unwrap();
    store.create_entity(&make_entity("m", "Memory", "m")).await.unwrap();
    store.create_relationship(&make_edge("a", "m", "HAS_MEMORY")).await.unwrap();

    store.delete_entity("m").await.unwrap();

    let views = store.find_relationships("a").await.unwrap();
    assert_eq!(views.len(), 1);
    assert!(views[0].from.is_some());
    assert!(views[0].to.is_none());
    assert_eq!(store.stats().await.unwrap().relationships, 1);
}

// ── Traversal ────────────────────────────────────────────────────────────

#[tokio::test]
async fn traverse_cycle_terminates() {
    let store = GraphStore::open_in_memory().unwrap();
    store.create_entity(&make_entity("A", "Function", "A")).await.unwrap();
    store.create_entity(&make_entity("B", "Function", "B")).await.unwrap();
    store.create_relationship(&make_edge("A", "B", "CALLS")).await.unwrap();
    store.create_relationship(&make_edge("B", "A", "CALLS")).await.unwrap();

    let outcome = store
        .traverse_detailed("A", &TraversalOptions::of_type("CALLS", 5))
        .await
        .unwrap();
    assert_eq!(outcome.edges.len(), 2);
    assert_eq!(outcome.nodes_visited, 2);
    assert!(!outcome.truncated);
}

#[tokio::test]
async fn traverse_follows_only_requested_type() {
    let store = GraphStore::open_in_memory().unwrap();
    store.create_relationship(&make_edge("f", "g", "CONTAINS")).await.unwrap();
    store.create_relationship(&make_edge("g", "h", "CONTAINS")).await.unwrap();
    store.create_relationship(&make_edge("f", "x", "IMPORTS")).await.unwrap();

    let edges = store
        .traverse("f", &TraversalOptions::of_type("CONTAINS", 2))
        .await
        .unwrap();
    let pairs: Vec<_> = edges.iter().map(|e| (e.from_id.as_str(), e.to_id.as_str())).collect();
    assert_eq!(pairs, vec![("f", "g"), ("g", "h")]);

    let unknown = store
        .traverse("nowhere", &TraversalOptions::of_type("CONTAINS", 2))
        .await
        .unwrap();
    assert!(unknown.is_empty());
}

// ── Stats / bulk ─────────────────────────────────────────────────────────

#[tokio::test]
async fn stats_group_entities_by_type() {
    let store = GraphStore::open_in_memory().unwrap();
    store.create_entity(&make_entity("f1", "Function", "a")).await.unwrap();
    store.create_entity(&make_entity("f2", "Function", "b")).await.unwrap();
    store.create_entity(&make_entity("file", "File", "c")).await.unwrap();

    let stats = store.stats().await.unwrap();
    assert_eq!(stats.entities, 3);
    let function = stats.types.iter().find(|t| t.entity_type == "Function").unwrap();
    assert_eq!(function.count, 2);
    assert_eq!(stats.types.len(), 2);
}

#[tokio::test]
async fn batch_import_commits_everything() {
    let store = GraphStore::open_in_memory().unwrap();
    let entities = vec![make_entity("a", "File", "a"), make_entity("b", "Function", "b")];
    let rels = vec![make_edge("a", "b", "CONTAINS")];

    let (e, r) = store.batch_import(&entities, &rels).await.unwrap();
    assert_eq!((e, r), (2, 1));
    let stats = store.stats().await.unwrap();
    assert_eq!((stats.entities, stats.relationships), (2, 1));
}

#[tokio::test]
async fn batch_import_is_all_or_nothing() {
    let store = GraphStore::open_in_memory().unwrap();
    store
        .pool()
        .writer
        .with_conn(|conn| {
            conn.execute_batch(
                "CREATE TRIGGER reject_poison BEFORE INSERT ON relationships
                 WHEN NEW.type = 'POISON'
                 BEGIN SELECT RAISE(ABORT, 'poisoned edge'); END;",
            )
            .unwrap();
            Ok(())
        })
        .await
        .unwrap();

    let entities = vec![make_entity("a", "File", "a"), make_entity("b", "Function", "b")];
    let rels = vec![make_edge("a", "b", "CONTAINS"), make_edge("a", "b", "POISON")];

    assert!(store.batch_import(&entities, &rels).await.is_err());
    let stats = store.stats().await.unwrap();
    assert_eq!((stats.entities, stats.relationships), (0, 0));
}

#[tokio::test]
async fn clear_removes_everything() {
    let store = GraphStore::open_in_memory().unwrap();
    store.create_entity(&make_entity("a", "File", "a")).await.unwrap();
    store.create_relationship(&make_edge("a", "b", "CONTAINS")).await.unwrap();
    store.clear().await.unwrap();
    let stats = store.stats().await.unwrap();
    assert_eq!((stats.entities, stats.relationships), (0, 0));
    assert!(stats.types.is_empty());
}
