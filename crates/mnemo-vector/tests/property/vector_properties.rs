//! Property: a stored document queried by its own text ranks at least as
//! high as every other stored document.

use std::sync::Arc;

use proptest::prelude::*;

use mnemo_core::Properties;
use mnemo_embeddings::EmbeddingEngine;
use mnemo_vector::VectorIndex;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn own_text_is_nearest(
        texts in prop::collection::vec("[a-zA-Z0-9 ]{1,40}", 1..12),
        pick in any::<prop::sample::Index>(),
    ) {
        let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        rt.block_on(async {
            let index = VectorIndex::in_memory(Arc::new(EmbeddingEngine::fallback_only(128)));
            let ids: Vec<String> = (0..texts.len()).map(|i| format!("m{i}")).collect();
            index.add(texts.clone(), None, Some(ids.clone())).await.unwrap();

            let target = pick.index(texts.len());
            let result = index.query(&texts[target], texts.len(), &Properties::new()).await.unwrap();
            let sims = result.similarities();
            let pos = result.ids.iter().position(|id| *id == ids[target]);
            prop_assert!(pos.is_some());
            let own = sims[pos.unwrap_or(0)];
            for s in &sims {
                prop_assert!(own + 1e-5 >= *s);
            }
            Ok(())
        })?;
    }
}
