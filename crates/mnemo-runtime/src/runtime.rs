use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use mnemo_core::config::MnemoConfig;
use mnemo_core::errors::MnemoResult;
use mnemo_core::graph::GraphStats;
use mnemo_core::{Properties, QueryIntent};
use mnemo_embeddings::EmbeddingEngine;
use mnemo_ingest::{IngestionCoordinator, LexicalExtractor};
use mnemo_retrieval::{KeywordClassifier, QueryOptions, QueryResponse, QueryRouter};
use mnemo_storage::GraphStore;
use mnemo_vector::{IndexStatus, VectorIndex};

use crate::exchange::{self, ExportDocument, ImportDocument, ImportReport};
use crate::project::{self, ProjectImportReport};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuntimeStats {
    pub graph: GraphStats,
    pub vector: IndexStatus,
    /// Embedding provider currently answering requests.
    pub embedding_provider: String,
}

/// Owns the graph store, vector index, ingestion coordinator and query
/// router. Build one per process, or one per test.
pub struct MnemoRuntime {
    config: MnemoConfig,
    graph: Arc<GraphStore>,
    vectors: Arc<VectorIndex>,
    embeddings: Arc<EmbeddingEngine>,
    ingest: IngestionCoordinator,
    router: QueryRouter,
}

impl MnemoRuntime {
    /// Open file-backed stores at the configured paths.
    pub async fn open(config: MnemoConfig) -> MnemoResult<Self> {
        config.validate()?;
        let graph = Arc::new(GraphStore::open(
            Path::new(&config.storage.db_path),
            config.storage.read_pool_size,
        )?);
        let embeddings = Arc::new(EmbeddingEngine::new(&config.embedding));
        let vectors = Arc::new(
            VectorIndex::open(&config.vector.snapshot_path(), embeddings.clone()).await?,
        );
        info!(
            event = "runtime_opened",
            db_path = %config.storage.db_path,
            embedding_provider = embeddings.active_provider_name(),
            "runtime opened"
        );
        Ok(Self::assemble(config, graph, vectors, embeddings))
    }

    /// Stores that live only as long as the runtime.
    pub fn open_in_memory(config: MnemoConfig) -> MnemoResult<Self> {
        config.validate()?;
        let graph = Arc::new(GraphStore::open_in_memory()?);
        let embeddings = Arc::new(EmbeddingEngine::new(&config.embedding));
        let vectors = Arc::new(VectorIndex::in_memory(embeddings.clone()));
        Ok(Self::assemble(config, graph, vectors, embeddings))
    }

    fn assemble(
        config: MnemoConfig,
        graph: Arc<GraphStore>,
        vectors: Arc<VectorIndex>,
        embeddings: Arc<EmbeddingEngine>,
    ) -> Self {
        let ingest = IngestionCoordinator::new(
            vectors.clone(),
            graph.clone(),
            Arc::new(LexicalExtractor::new()),
            config.ingest.clone(),
        );
        let router = QueryRouter::new(
            vectors.clone(),
            graph.clone(),
            Arc::new(KeywordClassifier::new()),
            config.retrieval.clone(),
        );
        Self {
            config,
            graph,
            vectors,
            embeddings,
            ingest,
            router,
        }
    }

    pub fn config(&self) -> &MnemoConfig {
        &self.config
    }

    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    pub fn vectors(&self) -> &VectorIndex {
        &self.vectors
    }

    // --- Memories ---

    pub async fn store(&self, content: &str, metadata: Properties) -> MnemoResult<String> {
        self.ingest.store(content, metadata).await
    }

    pub async fn update(
        &self,
        memory_id: &str,
        content: &str,
        metadata: Properties,
    ) -> MnemoResult<bool> {
        self.ingest.update(memory_id, content, metadata).await
    }

    pub async fn delete(&self, memory_id: &str) -> MnemoResult<bool> {
        self.ingest.delete(memory_id).await
    }

    // --- Queries ---

    pub async fn query(&self, query: &str, options: &QueryOptions) -> MnemoResult<QueryResponse> {
        self.router.route(query, options).await
    }

    pub fn classify(&self, query: &str) -> QueryIntent {
        self.router.classify(query)
    }

    pub async fn stats(&self) -> MnemoResult<RuntimeStats> {
        Ok(RuntimeStats {
            graph: self.graph.stats().await?,
            vector: self.vectors.status().await,
            embedding_provider: self.embeddings.active_provider_name().to_string(),
        })
    }

    // --- Exchange ---

    pub async fn export_document(&self) -> MnemoResult<ExportDocument> {
        exchange::export(&self.graph).await
    }

    pub async fn export_to(&self, path: &Path) -> MnemoResult<ExportDocument> {
        exchange::export_to(&self.graph, path).await
    }

    pub async fn import_document(&self, document: &ImportDocument) -> MnemoResult<ImportReport> {
        exchange::import(&self.graph, document).await
    }

    pub async fn import_from(&self, path: &Path) -> MnemoResult<ImportReport> {
        exchange::import_from(&self.graph, path).await
    }

    /// Store each of `files` as a code memory under a Project entity named
    /// after `root`. Unreadable files are skipped and counted.
    pub async fn import_project(
        &self,
        root: &Path,
        files: &[PathBuf],
    ) -> MnemoResult<ProjectImportReport> {
        project::import_project(&self.ingest, &self.graph, root, files).await
    }
}
