//! Graph export and import as a versioned JSON document.
//!
//! Only the graph travels; vector rows are not part of the document.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use mnemo_core::constants::EXPORT_FORMAT_VERSION;
use mnemo_core::errors::{ExchangeError, MnemoResult};
use mnemo_core::graph::{Entity, GraphStats, NewEntity, NewRelationship, Relationship};
use mnemo_storage::GraphStore;

/// `{version, exported_at, stats, entities, relationships}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub stats: GraphStats,
    pub entities: Vec<Entity>,
    pub relationships: Vec<Relationship>,
}

/// The subset of an export document that import reads. Timestamps, stats
/// and endpoint enrichment in the input are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImportDocument {
    pub version: String,
    #[serde(default)]
    pub entities: Vec<NewEntity>,
    #[serde(default)]
    pub relationships: Vec<NewRelationship>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub entities: usize,
    pub relationships: usize,
}

/// Snapshot the whole graph. Each relationship appears once.
pub async fn export(graph: &GraphStore) -> MnemoResult<ExportDocument> {
    Ok(ExportDocument {
        version: EXPORT_FORMAT_VERSION.to_string(),
        exported_at: Utc::now(),
        stats: graph.stats().await?,
        entities: graph.all_entities().await?,
        relationships: graph.all_relationships().await?,
    })
}

/// Write [`export`] as pretty JSON to `path`.
pub async fn export_to(graph: &GraphStore, path: &Path) -> MnemoResult<ExportDocument> {
    let document = export(graph).await?;
    let json = serde_json::to_vec_pretty(&document)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, json).await?;
    info!(
        event = "graph_exported",
        path = %path.display(),
        entities = document.entities.len(),
        relationships = document.relationships.len(),
        "graph exported"
    );
    Ok(document)
}

/// Parse a document, rejecting unknown versions.
pub fn parse(json: &str) -> MnemoResult<ImportDocument> {
    let document: ImportDocument =
        serde_json::from_str(json).map_err(|e| ExchangeError::Malformed {
            reason: e.to_string(),
        })?;
    if document.version != EXPORT_FORMAT_VERSION {
        return Err(ExchangeError::UnsupportedVersion {
            version: document.version,
        }
        .into());
    }
    Ok(document)
}

/// Upsert every entity and relationship in one transaction. Nothing is
/// applied if any row fails.
pub async fn import(graph: &GraphStore, document: &ImportDocument) -> MnemoResult<ImportReport> {
    let (entities, relationships) = graph
        .batch_import(&document.entities, &document.relationships)
        .await?;
    info!(event = "graph_imported", entities, relationships, "graph imported");
    Ok(ImportReport {
        entities,
        relationships,
    })
}

pub async fn import_from(graph: &GraphStore, path: &Path) -> MnemoResult<ImportReport> {
    let json = tokio::fs::read_to_string(path).await?;
    import(graph, &parse(&json)?).await
}
