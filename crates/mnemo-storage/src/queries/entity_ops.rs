//! Entity upsert, update, lookup, fuzzy search, delete.

use rusqlite::{params, Connection, OptionalExtension};

use mnemo_core::errors::MnemoResult;
use mnemo_core::graph::{Entity, NewEntity};

use super::rows::{
    decode_timestamp, encode_properties, encode_timestamp, like_pattern, next_timestamp,
    RawEntity, ENTITY_COLUMNS,
};
use crate::to_storage_err;

/// Insert or replace an entity by `entity_id`. Type, name, and properties
/// are replaced; `created_at` is kept; `updated_at` moves strictly forward.
pub fn upsert_entity(conn: &Connection, entity: &NewEntity) -> MnemoResult<()> {
    let previous: Option<Option<String>> = conn
        .query_row(
            "SELECT updated_at FROM entities WHERE entity_id = ?1",
            params![entity.entity_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    let previous = match previous.flatten() {
        Some(text) => Some(decode_timestamp(Some(&text))?),
        None => None,
    };
    let now = encode_timestamp(next_timestamp(previous));
    let properties = encode_properties(&entity.properties)?;

    conn.execute(
        "INSERT INTO entities (entity_id, type, name, properties, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?5)
         ON CONFLICT(entity_id) DO UPDATE SET
            type = excluded.type,
            name = excluded.name,
            properties = excluded.properties,
            updated_at = excluded.updated_at",
        params![entity.entity_id, entity.entity_type, entity.name, properties, now],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Replace type, name, and properties of an existing entity, keeping
/// `created_at`. Returns false when the id is unknown.
pub fn update_entity(conn: &Connection, entity: &NewEntity) -> MnemoResult<bool> {
    let previous: Option<Option<String>> = conn
        .query_row(
            "SELECT updated_at FROM entities WHERE entity_id = ?1",
            params![entity.entity_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    let Some(previous) = previous else {
        return Ok(false);
    };
    let previous = previous
        .as_deref()
        .map(|text| decode_timestamp(Some(text)))
        .transpose()?;
    let now = encode_timestamp(next_timestamp(previous));
    let properties = encode_properties(&entity.properties)?;

    let changed = conn
        .execute(
            "UPDATE entities SET type = ?2, name = ?3, properties = ?4, updated_at = ?5
             WHERE entity_id = ?1",
            params![entity.entity_id, entity.entity_type, entity.name, properties, now],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(changed > 0)
}

/// Get one entity by id.
pub fn get_entity(conn: &Connection, entity_id: &str) -> MnemoResult<Option<Entity>> {
    let raw = conn
        .query_row(
            &format!("SELECT {ENTITY_COLUMNS} FROM entities WHERE entity_id = ?1"),
            params![entity_id],
            |row| RawEntity::from_row(row, 0),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    raw.map(RawEntity::decode).transpose()
}

/// All entities with the given type tag, in insertion order.
pub fn entities_by_type(conn: &Connection, entity_type: &str) -> MnemoResult<Vec<Entity>> {
    collect(
        conn,
        &format!("SELECT {ENTITY_COLUMNS} FROM entities WHERE type = ?1 ORDER BY id"),
        params![entity_type],
    )
}

/// Substring match on name (ASCII case-insensitive, SQLite `LIKE`),
/// optionally restricted to one type.
pub fn search_entities(
    conn: &Connection,
    needle: &str,
    entity_type: Option<&str>,
) -> MnemoResult<Vec<Entity>> {
    let pattern = like_pattern(needle);
    match entity_type {
        Some(ty) => collect(
            conn,
            &format!(
                "SELECT {ENTITY_COLUMNS} FROM entities
                 WHERE name LIKE ?1 ESCAPE '\\' AND type = ?2 ORDER BY id"
            ),
            params![pattern, ty],
        ),
        None => collect(
            conn,
            &format!(
                "SELECT {ENTITY_COLUMNS} FROM entities
                 WHERE name LIKE ?1 ESCAPE '\\' ORDER BY id"
            ),
            params![pattern],
        ),
    }
}

/// Every entity, in insertion order.
pub fn all_entities(conn: &Connection) -> MnemoResult<Vec<Entity>> {
    collect(
        conn,
        &format!("SELECT {ENTITY_COLUMNS} FROM entities ORDER BY id"),
        [],
    )
}

/// Delete one entity row. Relationships that reference it are left in place.
pub fn delete_entity(conn: &Connection, entity_id: &str) -> MnemoResult<bool> {
    let removed = conn
        .execute("DELETE FROM entities WHERE entity_id = ?1", params![entity_id])
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(removed > 0)
}

fn collect(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> MnemoResult<Vec<Entity>> {
    let mut stmt = conn.prepare(sql).map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params, |row| RawEntity::from_row(row, 0))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for raw in rows {
        let raw = raw.map_err(|e| to_storage_err(e.to_string()))?;
        out.push(raw.decode()?);
    }
    Ok(out)
}
