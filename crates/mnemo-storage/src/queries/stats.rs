//! Aggregate counts.

use rusqlite::Connection;

use mnemo_core::errors::MnemoResult;
use mnemo_core::graph::{GraphStats, TypeCount};

use crate::to_storage_err;

pub fn graph_stats(conn: &Connection) -> MnemoResult<GraphStats> {
    let count = |sql: &str| -> MnemoResult<usize> {
        conn.query_row(sql, [], |row| row.get::<_, i64>(0))
            .map(|n| n.max(0) as usize)
            .map_err(|e| to_storage_err(e.to_string()))
    };
    let entities = count("SELECT COUNT(*) FROM entities")?;
    let relationships = count("SELECT COUNT(*) FROM relationships")?;

    let mut stmt = conn
        .prepare("SELECT type, COUNT(*) FROM entities GROUP BY type ORDER BY type")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| {
            Ok(TypeCount {
                entity_type: row.get(0)?,
                count: row.get::<_, i64>(1)?.max(0) as usize,
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut types = Vec::new();
    for row in rows {
        types.push(row.map_err(|e| to_storage_err(e.to_string()))?);
    }

    Ok(GraphStats {
        entities,
        relationships,
        types,
    })
}
