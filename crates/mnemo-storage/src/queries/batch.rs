//! Transactional bulk import and full clear.

use rusqlite::Connection;
use tracing::info;

use mnemo_core::errors::MnemoResult;
use mnemo_core::graph::{NewEntity, NewRelationship};

use super::entity_ops::upsert_entity;
use super::relationship_ops::upsert_relationship;
use crate::to_storage_err;

/// Upsert all entities, then all relationships, in one transaction.
/// Any failure rolls the whole batch back.
pub fn batch_import(
    conn: &mut Connection,
    entities: &[NewEntity],
    relationships: &[NewRelationship],
) -> MnemoResult<(usize, usize)> {
    let tx = conn
        .transaction()
        .map_err(|e| to_storage_err(e.to_string()))?;

    for entity in entities {
        upsert_entity(&tx, entity)?;
    }
    for rel in relationships {
        upsert_relationship(&tx, rel)?;
    }

    tx.commit().map_err(|e| to_storage_err(e.to_string()))?;
    info!(
        event = "graph_batch_imported",
        entities = entities.len(),
        relationships = relationships.len(),
        "batch import committed"
    );
    Ok((entities.len(), relationships.len()))
}

/// Remove every relationship and entity.
pub fn clear(conn: &Connection) -> MnemoResult<()> {
    conn.execute_batch("DELETE FROM relationships; DELETE FROM entities;")
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
