//! VectorIndex: add, query, update, delete over the in-memory table.
//!
//! Every mutation holds the write lock through the snapshot write, so
//! snapshots land in mutation order.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use mnemo_core::constants::meta_keys;
use mnemo_core::errors::{MnemoResult, VectorError};
use mnemo_core::properties::matches_filter;
use mnemo_core::traits::EmbeddingProvider;
use mnemo_core::{Properties, PropertyValue};

use crate::similarity::cosine_similarity;
use crate::snapshot;
use crate::table::VectorTable;

/// Nearest neighbours, nearest first. `distance = 1 - cosine_similarity`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorQueryResult {
    pub ids: Vec<String>,
    pub documents: Vec<String>,
    pub metadatas: Vec<Properties>,
    pub distances: Vec<f32>,
}

impl VectorQueryResult {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Similarities recovered from distances.
    pub fn similarities(&self) -> Vec<f32> {
        self.distances.iter().map(|d| 1.0 - d).collect()
    }
}

/// One stored row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    pub id: String,
    pub document: String,
    pub embedding: Vec<f32>,
    pub metadata: Properties,
}

/// Summary for stats output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexStatus {
    pub count: usize,
    pub dimensions: Option<usize>,
    pub snapshot_path: Option<String>,
}

pub struct VectorIndex {
    embedder: Arc<dyn EmbeddingProvider>,
    table: RwLock<VectorTable>,
    snapshot_path: Option<PathBuf>,
}

impl VectorIndex {
    /// Open an index persisted at `snapshot_path`, loading it if present.
    pub async fn open(
        snapshot_path: &Path,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> MnemoResult<Self> {
        let table = snapshot::load(snapshot_path).await?;
        info!(
            event = "vector_index_opened",
            path = %snapshot_path.display(),
            rows = table.len(),
            "vector index opened"
        );
        Ok(Self {
            embedder,
            table: RwLock::new(table),
            snapshot_path: Some(snapshot_path.to_path_buf()),
        })
    }

    /// Index that never touches disk.
    pub fn in_memory(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            embedder,
            table: RwLock::new(VectorTable::default()),
            snapshot_path: None,
        }
    }

    async fn persist(&self, table: &VectorTable) -> MnemoResult<()> {
        match &self.snapshot_path {
            Some(path) => snapshot::save(path, table).await,
            None => Ok(()),
        }
    }

    /// Embed and store documents. Ids default to `doc_{millis}_{i}`;
    /// metadata defaults to `{timestamp}`. An existing id is overwritten.
    pub async fn add(
        &self,
        documents: Vec<String>,
        metadatas: Option<Vec<Properties>>,
        ids: Option<Vec<String>>,
    ) -> MnemoResult<Vec<String>> {
        let n = documents.len();
        let now = Utc::now();

        let ids = match ids {
            Some(ids) if ids.len() != n => {
                return Err(VectorError::ArgumentLength {
                    documents: n,
                    other: ids.len(),
                    what: "ids",
                }
                .into())
            }
            Some(ids) => ids,
            None => (0..n)
                .map(|i| format!("doc_{}_{i}", now.timestamp_millis()))
                .collect(),
        };
        let metadatas = match metadatas {
            Some(m) if m.len() != n => {
                return Err(VectorError::ArgumentLength {
                    documents: n,
                    other: m.len(),
                    what: "metadatas",
                }
                .into())
            }
            Some(m) => m,
            None => {
                let stamp = PropertyValue::from(now.to_rfc3339());
                (0..n)
                    .map(|_| Properties::from([(meta_keys::TIMESTAMP.to_string(), stamp.clone())]))
                    .collect()
            }
        };

        let embeddings = self.embedder.embed_batch(&documents).await?;
        if embeddings.len() != n {
            return Err(VectorError::ArgumentLength {
                documents: n,
                other: embeddings.len(),
                what: "embeddings",
            }
            .into());
        }

        let mut table = self.table.write().await;
        for (((id, document), embedding), metadata) in ids
            .iter()
            .cloned()
            .zip(documents)
            .zip(embeddings)
            .zip(metadatas)
        {
            table.upsert(id, document, embedding, metadata);
        }
        self.persist(&table).await?;
        debug!(added = n, total = table.len(), "vector rows added");
        Ok(ids)
    }

    /// The `k` nearest rows to `text` whose metadata matches every
    /// `filter` pair.
    pub async fn query(
        &self,
        text: &str,
        k: usize,
        filter: &Properties,
    ) -> MnemoResult<VectorQueryResult> {
        let query = self.embedder.embed(text).await?;
        let table = self.table.read().await;

        let mut scored: Vec<(usize, f32)> = (0..table.len())
            .filter(|&i| matches_filter(&table.metadatas[i], filter))
            .map(|i| (i, cosine_similarity(&query, &table.embeddings[i])))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);

        let mut result = VectorQueryResult::default();
        for (i, similarity) in scored {
            result.ids.push(table.ids[i].clone());
            result.documents.push(table.documents[i].clone());
            result.metadatas.push(table.metadatas[i].clone());
            result.distances.push(1.0 - similarity);
        }
        Ok(result)
    }

    /// Re-embed and replace one row. Returns false (and does nothing) for
    /// an unknown id.
    pub async fn update(&self, id: &str, document: &str, metadata: Properties) -> MnemoResult<bool> {
        if !self.contains(id).await {
            return Ok(false);
        }
        let embedding = self.embedder.embed(document).await?;

        let mut table = self.table.write().await;
        let Some(i) = table.position(id) else {
            return Ok(false);
        };
        table.documents[i] = document.to_string();
        table.embeddings[i] = embedding;
        table.metadatas[i] = metadata;
        self.persist(&table).await?;
        Ok(true)
    }

    /// Remove rows by id. Unknown ids are ignored. Returns how many were removed.
    pub async fn delete(&self, ids: &[String]) -> MnemoResult<usize> {
        let mut table = self.table.write().await;
        let removed = ids.iter().filter(|id| table.remove(id.as_str())).count();
        if removed > 0 {
            self.persist(&table).await?;
        }
        Ok(removed)
    }

    pub async fn get(&self, id: &str) -> Option<VectorRecord> {
        let table = self.table.read().await;
        let i = table.position(id)?;
        Some(VectorRecord {
            id: table.ids[i].clone(),
            document: table.documents[i].clone(),
            embedding: table.embeddings[i].clone(),
            metadata: table.metadatas[i].clone(),
        })
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.table.read().await.position(id).is_some()
    }

    pub async fn count(&self) -> usize {
        self.table.read().await.len()
    }

    pub async fn status(&self) -> IndexStatus {
        let table = self.table.read().await;
        IndexStatus {
            count: table.len(),
            dimensions: table.dimensions(),
            snapshot_path: self
                .snapshot_path
                .as_ref()
                .map(|p| p.display().to_string()),
        }
    }
}
