//! EmbeddingEngine behaviour: caching, fallback, and never surfacing
//! provider errors.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use mnemo_core::config::{EmbeddingConfig, EmbeddingProviderKind};
use mnemo_core::errors::{EmbeddingError, MnemoResult};
use mnemo_core::traits::EmbeddingProvider;
use mnemo_embeddings::{CharCodeEmbedding, DegradationChain, EmbeddingEngine, HttpEmbeddingProvider};
use mnemo_embeddings::providers::HttpFlavor;

/// Counts calls; fails when `fail` is set.
struct Counting {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

#[async_trait]
impl EmbeddingProvider for Counting {
    async fn embed(&self, text: &str) -> MnemoResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(EmbeddingError::InferenceFailed {
                reason: "boom".into(),
            }
            .into());
        }
        Ok(vec![text.len() as f32, 1.0, 0.0])
    }
    fn dimensions(&self) -> usize {
        3
    }
    fn name(&self) -> &str {
        "counting"
    }
    fn is_available(&self) -> bool {
        true
    }
}

fn make_engine(fail: bool) -> (EmbeddingEngine, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut chain = DegradationChain::new(3);
    chain.push(Box::new(Counting {
        calls: Arc::clone(&calls),
        fail,
    }));
    (EmbeddingEngine::with_chain(chain, 100), calls)
}

#[tokio::test]
async fn repeated_text_hits_cache() {
    let (engine, calls) = make_engine(false);
    let a = engine.embed_text("hello").await;
    let b = engine.embed_text("hello").await;
    assert_eq!(a, b);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failing_provider_degrades_silently() {
    let (engine, _) = make_engine(true);
    let v = engine.embed("hello").await.unwrap();
    assert_eq!(v, CharCodeEmbedding::new(3).vector("hello"));
    assert_eq!(engine.degradation_events().len(), 1);
}

/// Fails while `down` is set.
struct Flaky {
    down: Arc<AtomicBool>,
}

#[async_trait]
impl EmbeddingProvider for Flaky {
    async fn embed(&self, text: &str) -> MnemoResult<Vec<f32>> {
        if self.down.load(Ordering::SeqCst) {
            return Err(EmbeddingError::InferenceFailed {
                reason: "provider offline".into(),
            }
            .into());
        }
        Ok(vec![1.0, text.len() as f32, 2.0])
    }
    fn dimensions(&self) -> usize {
        3
    }
    fn name(&self) -> &str {
        "flaky"
    }
    fn is_available(&self) -> bool {
        true
    }
}

fn make_flaky_engine() -> (EmbeddingEngine, Arc<AtomicBool>) {
    let down = Arc::new(AtomicBool::new(true));
    let mut chain = DegradationChain::new(3);
    chain.push(Box::new(Flaky {
        down: Arc::clone(&down),
    }));
    (EmbeddingEngine::with_chain(chain, 100), down)
}

#[tokio::test]
async fn fallback_vector_is_not_cached_across_recovery() {
    let (engine, down) = make_flaky_engine();
    let degraded = engine.embed_text("query").await;
    assert_eq!(degraded, CharCodeEmbedding::new(3).vector("query"));

    down.store(false, Ordering::SeqCst);
    let recovered = engine.embed_text("query").await;
    assert_eq!(recovered, vec![1.0, 5.0, 2.0]);
}

#[tokio::test]
async fn fallback_batch_is_not_cached_across_recovery() {
    let (engine, down) = make_flaky_engine();
    let texts = vec!["ab".to_string(), "abcd".to_string()];
    let degraded = engine.embed_texts(&texts).await;
    assert_eq!(degraded[0], CharCodeEmbedding::new(3).vector("ab"));

    down.store(false, Ordering::SeqCst);
    let recovered = engine.embed_texts(&texts).await;
    assert_eq!(recovered, vec![vec![1.0, 2.0, 2.0], vec![1.0, 4.0, 2.0]]);
}

#[tokio::test]
async fn batch_mixes_cached_and_fresh() {
    let (engine, calls) = make_engine(false);
    engine.embed_text("aa").await;
    let texts = vec!["aa".to_string(), "bbb".to_string()];
    let vectors = engine.embed_texts(&texts).await;
    assert_eq!(vectors[0], vec![2.0, 1.0, 0.0]);
    assert_eq!(vectors[1], vec![3.0, 1.0, 0.0]);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn fallback_config_is_deterministic() {
    let engine = EmbeddingEngine::new(&EmbeddingConfig::default());
    assert_eq!(engine.active_provider_name(), "char-code");
    let a = engine.embed_text("如何实现用户认证").await;
    let b = EmbeddingEngine::fallback_only(1536).embed_text("如何实现用户认证").await;
    assert_eq!(a.len(), 1536);
    assert_eq!(a, b);
}

#[tokio::test]
async fn unreachable_http_provider_falls_back() {
    let provider = HttpEmbeddingProvider::new(
        HttpFlavor::OpenAi {
            base_url: "http://127.0.0.1:9/v1".into(),
        },
        "key".into(),
        "text-embedding-ada-002".into(),
        8,
    )
    .with_max_retries(0);
    let mut chain = DegradationChain::new(8);
    chain.push(Box::new(provider));
    let engine = EmbeddingEngine::with_chain(chain, 10);

    let v = engine.embed_text("abc").await;
    assert_eq!(v, CharCodeEmbedding::new(8).vector("abc"));
    assert_eq!(engine.degradation_events().len(), 1);
}

#[test]
fn misconfigured_primary_is_skipped() {
    let config = EmbeddingConfig {
        provider: EmbeddingProviderKind::OpenAi,
        api_key: None,
        ..Default::default()
    };
    let engine = EmbeddingEngine::new(&config);
    assert_eq!(engine.active_provider_name(), "char-code");
}
