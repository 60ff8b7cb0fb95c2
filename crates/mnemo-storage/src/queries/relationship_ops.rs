//! Relationship upsert and endpoint-enriched lookup.

use rusqlite::{params, Connection};

use mnemo_core::errors::MnemoResult;
use mnemo_core::graph::{EndpointSummary, NewRelationship, Relationship, RelationshipView};

use super::rows::{
    decode_properties, encode_properties, encode_timestamp, RawRelationship,
    RELATIONSHIP_COLUMNS,
};
use crate::to_storage_err;

/// Insert an edge, or replace the properties of the existing edge with the
/// same `(from_id, to_id, type)`.
pub fn upsert_relationship(conn: &Connection, rel: &NewRelationship) -> MnemoResult<()> {
    let properties = encode_properties(&rel.properties)?;
    conn.execute(
        "INSERT INTO relationships (from_id, to_id, type, properties, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(from_id, to_id, type) DO UPDATE SET
            properties = excluded.properties",
        params![
            rel.from_id,
            rel.to_id,
            rel.rel_type,
            properties,
            encode_timestamp(chrono::Utc::now()),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Edges touching `entity_id` at either end, each with both endpoints'
/// type, name, and properties. Dangling endpoints come back as `None`.
pub fn find_relationships(conn: &Connection, entity_id: &str) -> MnemoResult<Vec<RelationshipView>> {
    let mut stmt = conn
        .prepare(
            "SELECT r.from_id, r.to_id, r.type, r.properties, r.created_at,
                    e1.type, e1.name, e1.properties,
                    e2.type, e2.name, e2.properties
             FROM relationships r
             LEFT JOIN entities e1 ON r.from_id = e1.entity_id
             LEFT JOIN entities e2 ON r.to_id = e2.entity_id
             WHERE r.from_id = ?1 OR r.to_id = ?1
             ORDER BY r.id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    type RawEndpoint = (Option<String>, Option<String>, Option<String>);
    let rows = stmt
        .query_map(params![entity_id], |row| {
            let rel = RawRelationship::from_row(row, 0)?;
            let from: RawEndpoint = (row.get(5)?, row.get(6)?, row.get(7)?);
            let to: RawEndpoint = (row.get(8)?, row.get(9)?, row.get(10)?);
            Ok((rel, from, to))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let endpoint = |(ty, name, props): RawEndpoint| -> MnemoResult<Option<EndpointSummary>> {
        match (ty, name) {
            (Some(entity_type), Some(name)) => Ok(Some(EndpointSummary {
                entity_type,
                name,
                properties: decode_properties(props.as_deref())?,
            })),
            _ => Ok(None),
        }
    };

    let mut out = Vec::new();
    for row in rows {
        let (rel, from, to) = row.map_err(|e| to_storage_err(e.to_string()))?;
        out.push(RelationshipView {
            relationship: rel.decode()?,
            from: endpoint(from)?,
            to: endpoint(to)?,
        });
    }
    Ok(out)
}

/// Plain edges touching `entity_id`, optionally of one type, in insertion order.
pub fn edges_of(
    conn: &Connection,
    entity_id: &str,
    rel_type: Option<&str>,
) -> MnemoResult<Vec<Relationship>> {
    match rel_type {
        Some(ty) => collect(
            conn,
            &format!(
                "SELECT {RELATIONSHIP_COLUMNS} FROM relationships
                 WHERE (from_id = ?1 OR to_id = ?1) AND type = ?2 ORDER BY id"
            ),
            params![entity_id, ty],
        ),
        None => collect(
            conn,
            &format!(
                "SELECT {RELATIONSHIP_COLUMNS} FROM relationships
                 WHERE from_id = ?1 OR to_id = ?1 ORDER BY id"
            ),
            params![entity_id],
        ),
    }
}

/// Every edge, in insertion order.
pub fn all_relationships(conn: &Connection) -> MnemoResult<Vec<Relationship>> {
    collect(
        conn,
        &format!("SELECT {RELATIONSHIP_COLUMNS} FROM relationships ORDER BY id"),
        [],
    )
}

fn collect(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> MnemoResult<Vec<Relationship>> {
    let mut stmt = conn.prepare(sql).map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params, |row| RawRelationship::from_row(row, 0))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for raw in rows {
        let raw = raw.map_err(|e| to_storage_err(e.to_string()))?;
        out.push(raw.decode()?);
    }
    Ok(out)
}
