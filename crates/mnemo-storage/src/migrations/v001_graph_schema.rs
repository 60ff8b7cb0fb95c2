//! v001: entities and relationships with their lookup indexes.

use rusqlite::Connection;

use mnemo_core::errors::MnemoResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> MnemoResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS entities (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            entity_id   TEXT UNIQUE NOT NULL,
            type        TEXT NOT NULL,
            name        TEXT NOT NULL,
            properties  TEXT,
            created_at  DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at  DATETIME DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS relationships (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            from_id     TEXT NOT NULL,
            to_id       TEXT NOT NULL,
            type        TEXT NOT NULL,
            properties  TEXT,
            created_at  DATETIME DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (from_id) REFERENCES entities(entity_id),
            FOREIGN KEY (to_id) REFERENCES entities(entity_id),
            UNIQUE(from_id, to_id, type)
        );

        CREATE INDEX IF NOT EXISTS idx_entities_type ON entities(type);
        CREATE INDEX IF NOT EXISTS idx_entities_name ON entities(name);
        CREATE INDEX IF NOT EXISTS idx_relationships_type ON relationships(type);
        CREATE INDEX IF NOT EXISTS idx_relationships_from ON relationships(from_id);
        CREATE INDEX IF NOT EXISTS idx_relationships_to ON relationships(to_id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
