//! IngestionCoordinator: the single write path for memories.
//!
//! The vector row is written first and is the system of record. Graph
//! structure follows as one transaction; if it fails the memory stays
//! searchable by similarity and the caller gets `PartialIngest`.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use mnemo_core::config::IngestConfig;
use mnemo_core::constants::{meta_keys, ENTITY_FILE, ENTITY_MEMORY, REL_HAS_MEMORY};
use mnemo_core::errors::{IngestError, MnemoResult};
use mnemo_core::graph::{NewEntity, NewRelationship};
use mnemo_core::memory::{content_preview, file_entity_id, file_path, is_code};
use mnemo_core::properties::{get_str, merge, props_from};
use mnemo_core::traits::{Extraction, StructureExtractor};
use mnemo_core::{Properties, PropertyValue};
use mnemo_storage::GraphStore;
use mnemo_vector::VectorIndex;

use crate::ids::generate_memory_id;

pub struct IngestionCoordinator {
    vectors: Arc<VectorIndex>,
    graph: Arc<GraphStore>,
    extractor: Arc<dyn StructureExtractor>,
    config: IngestConfig,
}

impl IngestionCoordinator {
    pub fn new(
        vectors: Arc<VectorIndex>,
        graph: Arc<GraphStore>,
        extractor: Arc<dyn StructureExtractor>,
        config: IngestConfig,
    ) -> Self {
        Self {
            vectors,
            graph,
            extractor,
            config,
        }
    }

    /// Store a memory and return its generated id.
    ///
    /// Memories with a `file_path` also get a File entity, a Memory entity
    /// and a `HAS_MEMORY` edge; `type = "code"` additionally runs the
    /// structure extractor over the content. A code memory without a path
    /// gets no graph structure.
    pub async fn store(&self, content: &str, metadata: Properties) -> MnemoResult<String> {
        let memory_id = generate_memory_id();
        let now = Utc::now().to_rfc3339();

        let mut row_meta = metadata.clone();
        row_meta.insert(meta_keys::MEMORY_ID.to_string(), memory_id.clone().into());
        row_meta.insert(meta_keys::CREATED_AT.to_string(), now.clone().into());
        self.vectors
            .add(
                vec![content.to_string()],
                Some(vec![row_meta]),
                Some(vec![memory_id.clone()]),
            )
            .await?;

        let Some(plan) = self.plan_graph_write(&memory_id, content, &metadata, &now) else {
            info!(event = "memory_stored", memory_id = %memory_id, graph = false, "memory stored");
            return Ok(memory_id);
        };

        match self
            .graph
            .batch_import(&plan.entities, &plan.relationships)
            .await
        {
            Ok((entities, relationships)) => {
                info!(
                    event = "memory_stored",
                    memory_id = %memory_id,
                    graph = true,
                    entities,
                    relationships,
                    "memory stored"
                );
                Ok(memory_id)
            }
            Err(e) => {
                warn!(
                    event = "graph_write_failed",
                    memory_id = %memory_id,
                    error = %e,
                    "memory stored without graph structure"
                );
                Err(IngestError::PartialIngest {
                    memory_id,
                    reason: e.to_string(),
                }
                .into())
            }
        }
    }

    /// The graph rows a memory produces, or `None` when it has no file path.
    pub fn plan_graph_write(
        &self,
        memory_id: &str,
        content: &str,
        metadata: &Properties,
        created_at: &str,
    ) -> Option<Extraction> {
        let path = file_path(metadata)?;
        let file_id = file_entity_id(path);

        let mut plan = Extraction::default();
        plan.entities.push(NewEntity::new(
            file_id.clone(),
            ENTITY_FILE,
            base_name(path),
            props_from([
                ("path", path.to_string()),
                ("extension", extension(path)),
                (meta_keys::MEMORY_ID, memory_id.to_string()),
            ]),
        ));

        let mut memory_props = props_from([(
            meta_keys::CONTENT_PREVIEW,
            content_preview(content, self.config.preview_chars),
        )]);
        memory_props = merge(&memory_props, metadata);
        plan.entities.push(NewEntity::new(
            memory_id,
            ENTITY_MEMORY,
            get_str(metadata, meta_keys::TITLE).unwrap_or(&self.config.default_memory_name),
            memory_props,
        ));
        plan.relationships.push(NewRelationship::new(
            file_id,
            memory_id,
            REL_HAS_MEMORY,
            props_from([(meta_keys::CREATED_AT, created_at)]),
        ));

        if is_code(metadata) {
            let extracted = self.extractor.extract(path, content);
            debug!(
                extractor = self.extractor.name(),
                entities = extracted.entities.len(),
                relationships = extracted.relationships.len(),
                "structure extracted"
            );
            plan.entities.extend(extracted.entities);
            plan.relationships.extend(extracted.relationships);
        }
        Some(plan)
    }

    /// Replace a memory's content and metadata.
    ///
    /// The vector row keeps its `memory_id` and `created_at` and gains
    /// `updated_at`. An existing Memory entity keeps its type, takes the new
    /// `title` if given, and has the new metadata merged over its
    /// properties along with a fresh preview. Extracted structure is not
    /// rebuilt. Returns false when neither store knew the id.
    pub async fn update(
        &self,
        memory_id: &str,
        content: &str,
        metadata: Properties,
    ) -> MnemoResult<bool> {
        let now: PropertyValue = Utc::now().to_rfc3339().into();

        let row_updated = match self.vectors.get(memory_id).await {
            Some(existing) => {
                let mut row_meta = metadata.clone();
                row_meta.insert(meta_keys::MEMORY_ID.to_string(), memory_id.into());
                if let Some(created) = existing.metadata.get(meta_keys::CREATED_AT) {
                    row_meta.insert(meta_keys::CREATED_AT.to_string(), created.clone());
                }
                row_meta.insert(meta_keys::UPDATED_AT.to_string(), now);
                self.vectors.update(memory_id, content, row_meta).await?
            }
            None => false,
        };

        let entity_updated = match self.graph.find_entity(memory_id).await? {
            Some(entity) => {
                let mut props = merge(&entity.properties, &metadata);
                props.insert(
                    meta_keys::CONTENT_PREVIEW.to_string(),
                    content_preview(content, self.config.preview_chars).into(),
                );
                let name = get_str(&metadata, meta_keys::TITLE)
                    .map(str::to_string)
                    .unwrap_or(entity.name);
                self.graph
                    .update_entity(&NewEntity::new(memory_id, entity.entity_type, name, props))
                    .await?
            }
            None => false,
        };

        if row_updated || entity_updated {
            info!(event = "memory_updated", memory_id, "memory updated");
        } else {
            debug!(memory_id, "update of unknown memory ignored");
        }
        Ok(row_updated || entity_updated)
    }

    /// Remove a memory's vector row and Memory entity. Edges touching the
    /// entity and any File or extracted entities are left in place.
    pub async fn delete(&self, memory_id: &str) -> MnemoResult<bool> {
        let removed_rows = self.vectors.delete(&[memory_id.to_string()]).await?;
        let removed_entity = self.graph.delete_entity(memory_id).await?;
        let removed = removed_rows > 0 || removed_entity;
        if removed {
            info!(event = "memory_deleted", memory_id, "memory deleted");
        }
        Ok(removed)
    }
}

fn base_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

/// Extension with its leading dot, or empty.
fn extension(path: &str) -> String {
    Path::new(path)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default()
}
