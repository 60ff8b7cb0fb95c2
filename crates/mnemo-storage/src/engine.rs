//! GraphStore: owns the connection pool, runs migrations at startup, and
//! exposes every graph operation as an async method.

use std::path::Path;

use rusqlite::Connection;
use tracing::{debug, info};

use mnemo_core::errors::MnemoResult;
use mnemo_core::graph::{
    Entity, GraphStats, NewEntity, NewRelationship, Relationship, RelationshipView,
};

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::{batch, entity_ops, relationship_ops, stats};
use crate::traversal::{traverse_with, TraversalOptions, TraversalOutcome};

/// The entity/relationship store.
pub struct GraphStore {
    pool: ConnectionPool,
}

impl GraphStore {
    /// Open a store backed by a file on disk.
    pub fn open(path: &Path, read_pool_size: usize) -> MnemoResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let pool = ConnectionPool::open(path, read_pool_size)?;
        let store = Self { pool };
        store.initialize()?;
        info!(event = "graph_store_opened", path = %path.display(), "graph store opened");
        Ok(store)
    }

    /// Open an in-memory store. All reads go through the writer.
    pub fn open_in_memory() -> MnemoResult<Self> {
        let store = Self {
            pool: ConnectionPool::open_in_memory()?,
        };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> MnemoResult<()> {
        self.pool.writer.with_conn_sync(|conn| {
            let version = migrations::run_migrations(conn)?;
            debug!(version, "graph schema ready");
            Ok(())
        })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Run a read-only closure on a pooled reader when file-backed,
    /// otherwise on the writer.
    async fn with_reader<F, T>(&self, f: F) -> MnemoResult<T>
    where
        F: FnOnce(&Connection) -> MnemoResult<T>,
    {
        match &self.pool.readers {
            Some(readers) => readers.with_conn(f),
            None => self.pool.writer.with_conn(f).await,
        }
    }

    // --- Entities ---

    /// Upsert by `entity_id`.
    pub async fn create_entity(&self, entity: &NewEntity) -> MnemoResult<()> {
        self.pool
            .writer
            .with_conn(|conn| entity_ops::upsert_entity(conn, entity))
            .await
    }

    /// Update an existing entity in place. Returns false for an unknown id.
    pub async fn update_entity(&self, entity: &NewEntity) -> MnemoResult<bool> {
        self.pool
            .writer
            .with_conn(|conn| entity_ops::update_entity(conn, entity))
            .await
    }

    pub async fn find_entity(&self, entity_id: &str) -> MnemoResult<Option<Entity>> {
        self.with_reader(|conn| entity_ops::get_entity(conn, entity_id))
            .await
    }

    pub async fn find_entities_by_type(&self, entity_type: &str) -> MnemoResult<Vec<Entity>> {
        self.with_reader(|conn| entity_ops::entities_by_type(conn, entity_type))
            .await
    }

    /// Substring search on entity names, optionally filtered by type.
    pub async fn search_entities(
        &self,
        needle: &str,
        entity_type: Option<&str>,
    ) -> MnemoResult<Vec<Entity>> {
        self.with_reader(|conn| entity_ops::search_entities(conn, needle, entity_type))
            .await
    }

    /// Delete one entity row; its relationships are left as orphans.
    pub async fn delete_entity(&self, entity_id: &str) -> MnemoResult<bool> {
        self.pool
            .writer
            .with_conn(|conn| entity_ops::delete_entity(conn, entity_id))
            .await
    }

    pub async fn all_entities(&self) -> MnemoResult<Vec<Entity>> {
        self.with_reader(entity_ops::all_entities).await
    }

    // --- Relationships ---

    /// Upsert on `(from_id, to_id, type)`.
    pub async fn create_relationship(&self, rel: &NewRelationship) -> MnemoResult<()> {
        self.pool
            .writer
            .with_conn(|conn| relationship_ops::upsert_relationship(conn, rel))
            .await
    }

    /// Edges where `entity_id` is either endpoint, with endpoint summaries.
    pub async fn find_relationships(&self, entity_id: &str) -> MnemoResult<Vec<RelationshipView>> {
        self.with_reader(|conn| relationship_ops::find_relationships(conn, entity_id))
            .await
    }

    pub async fn all_relationships(&self) -> MnemoResult<Vec<Relationship>> {
        self.with_reader(relationship_ops::all_relationships).await
    }

    // --- Traversal ---

    /// Bounded walk from `start_id`. Returns edges in first-discovered order.
    pub async fn traverse(
        &self,
        start_id: &str,
        options: &TraversalOptions,
    ) -> MnemoResult<Vec<Relationship>> {
        Ok(self.traverse_detailed(start_id, options).await?.edges)
    }

    /// Like [`traverse`](Self::traverse) but also reports visit count and truncation.
    pub async fn traverse_detailed(
        &self,
        start_id: &str,
        options: &TraversalOptions,
    ) -> MnemoResult<TraversalOutcome> {
        let outcome = self
            .with_reader(|conn| {
                traverse_with(start_id, options, |node, ty| {
                    relationship_ops::edges_of(conn, node, ty)
                })
            })
            .await?;
        debug!(
            start = start_id,
            edges = outcome.edges.len(),
            nodes = outcome.nodes_visited,
            truncated = outcome.truncated,
            "traversal complete"
        );
        Ok(outcome)
    }

    // --- Bulk ---

    pub async fn stats(&self) -> MnemoResult<GraphStats> {
        self.with_reader(stats::graph_stats).await
    }

    /// All entity upserts, then all relationship upserts, in one transaction.
    pub async fn batch_import(
        &self,
        entities: &[NewEntity],
        relationships: &[NewRelationship],
    ) -> MnemoResult<(usize, usize)> {
        self.pool
            .writer
            .with_conn_mut(|conn| batch::batch_import(conn, entities, relationships))
            .await
    }

    /// Remove every entity and relationship.
    pub async fn clear(&self) -> MnemoResult<()> {
        self.pool.writer.with_conn(batch::clear).await?;
        info!(event = "graph_cleared", "graph store cleared");
        Ok(())
    }
}
