//! Property tests for the graph store: upsert idempotency, edge uniqueness,
//! traversal termination on arbitrary (cyclic) graphs.

use std::collections::HashSet;

use proptest::prelude::*;

use mnemo_core::graph::{NewEntity, NewRelationship};
use mnemo_core::properties::props_from;
use mnemo_core::Properties;
use mnemo_storage::{GraphStore, TraversalOptions};

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn repeated_upserts_leave_one_row_with_latest_properties(
        values in prop::collection::vec(any::<i64>(), 1..8),
    ) {
        let rt = runtime();
        rt.block_on(async {
            let store = GraphStore::open_in_memory().unwrap();
            let mut last_updated = None;
            for v in &values {
                store
                    .create_entity(&NewEntity::new("e", "Function", "f", props_from([("v", *v)])))
                    .await
                    .unwrap();
                let current = store.find_entity("e").await.unwrap().unwrap();
                if let Some(prev) = last_updated {
                    prop_assert!(current.updated_at > prev);
                }
                last_updated = Some(current.updated_at);
            }
            let entity = store.find_entity("e").await.unwrap().unwrap();
            prop_assert_eq!(store.stats().await.unwrap().entities, 1);
            prop_assert_eq!(entity.properties["v"].as_i64(), values.last().copied());
            Ok(())
        })?;
    }

    #[test]
    fn relationship_count_equals_distinct_triples(
        edges in prop::collection::vec((0u8..4, 0u8..4, 0u8..2), 0..30),
    ) {
        let rt = runtime();
        rt.block_on(async {
            let store = GraphStore::open_in_memory().unwrap();
            let mut distinct = HashSet::new();
            for (from, to, ty) in &edges {
                let rel = NewRelationship::new(
                    format!("n{from}"),
                    format!("n{to}"),
                    format!("T{ty}"),
                    Properties::new(),
                );
                store.create_relationship(&rel).await.unwrap();
                distinct.insert((from, to, ty));
            }
            prop_assert_eq!(store.stats().await.unwrap().relationships, distinct.len());
            Ok(())
        })?;
    }

    #[test]
    fn traversal_terminates_without_revisiting(
        edges in prop::collection::vec((0u8..8, 0u8..8), 0..40),
        depth in 0usize..8,
    ) {
        let rt = runtime();
        rt.block_on(async {
            let store = GraphStore::open_in_memory().unwrap();
            for (from, to) in &edges {
                let rel = NewRelationship::new(
                    format!("n{from}"),
                    format!("n{to}"),
                    "LINK",
                    Properties::new(),
                );
                store.create_relationship(&rel).await.unwrap();
            }
            let outcome = store
                .traverse_detailed("n0", &TraversalOptions::of_type("LINK", depth))
                .await
                .unwrap();

            let mut seen = HashSet::new();
            for e in &outcome.edges {
                prop_assert!(seen.insert((e.from_id.clone(), e.to_id.clone())));
            }
            prop_assert!(outcome.nodes_visited <= 8);
            prop_assert!(outcome.edges.len() <= store.stats().await.unwrap().relationships);
            Ok(())
        })?;
    }
}
