//! QueryRouter: classify, dispatch, fuse.

use std::sync::Arc;

use tracing::info;

use mnemo_core::config::RetrievalConfig;
use mnemo_core::errors::{MnemoResult, RetrievalError};
use mnemo_core::traits::IntentClassifier;
use mnemo_core::QueryIntent;
use mnemo_storage::GraphStore;
use mnemo_vector::VectorIndex;

use crate::fusion::fuse;
use crate::options::QueryOptions;
use crate::results::{QueryResponse, QueryResults, SemanticResults, StructuralResults};
use crate::search::{semantic, structural};

pub struct QueryRouter {
    vectors: Arc<VectorIndex>,
    graph: Arc<GraphStore>,
    classifier: Arc<dyn IntentClassifier>,
    config: RetrievalConfig,
}

impl QueryRouter {
    pub fn new(
        vectors: Arc<VectorIndex>,
        graph: Arc<GraphStore>,
        classifier: Arc<dyn IntentClassifier>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            vectors,
            graph,
            classifier,
            config,
        }
    }

    pub fn classify(&self, query: &str) -> QueryIntent {
        self.classifier.classify(query)
    }

    /// Answer `query`, routed by `options.intent` or else by classification.
    pub async fn route(&self, query: &str, options: &QueryOptions) -> MnemoResult<QueryResponse> {
        if options.limit == Some(0) {
            return Err(RetrievalError::InvalidOptions {
                reason: "limit must be greater than 0".to_string(),
            }
            .into());
        }

        let intent = options.intent.unwrap_or_else(|| self.classify(query));
        info!(event = "query_routed", intent = %intent, "query routed");

        let response = match intent {
            QueryIntent::Semantic => QueryResponse {
                intent,
                query: query.to_string(),
                results: QueryResults::Semantic(self.semantic(query, options).await?),
                semantic: None,
                structural: None,
            },
            QueryIntent::Structural => QueryResponse {
                intent,
                query: query.to_string(),
                results: QueryResults::Structural(self.structural(query, options).await?),
                semantic: None,
                structural: None,
            },
            QueryIntent::Hybrid => self.hybrid(query, options).await?,
        };
        Ok(response)
    }

    async fn semantic(&self, query: &str, options: &QueryOptions) -> MnemoResult<SemanticResults> {
        let limit = options.limit.unwrap_or(self.config.default_limit);
        semantic::search(&self.vectors, query, limit, &options.filter).await
    }

    async fn structural(
        &self,
        query: &str,
        options: &QueryOptions,
    ) -> MnemoResult<StructuralResults> {
        structural::search(&self.graph, query, options, &self.config).await
    }

    /// Both legs concurrently, then fusion. The structural leg always
    /// searches by name here so its hits can meet the semantic ones.
    async fn hybrid(&self, query: &str, options: &QueryOptions) -> MnemoResult<QueryResponse> {
        let (semantic, structural) = tokio::join!(
            self.semantic(query, options),
            structural::search_by_name(
                &self.graph,
                query,
                options.entity_type.as_deref(),
                self.config.structural_top_k,
            ),
        );
        let (semantic, structural) = (semantic?, structural?);
        let fused = fuse(&semantic, &structural, &self.config);
        info!(
            event = "hybrid_fused",
            semantic = semantic.len(),
            structural = structural.len(),
            fused = fused.len(),
            "hybrid results fused"
        );
        Ok(QueryResponse {
            intent: QueryIntent::Hybrid,
            query: query.to_string(),
            results: QueryResults::Hybrid(fused),
            semantic: Some(semantic),
            structural: Some(structural),
        })
    }
}
