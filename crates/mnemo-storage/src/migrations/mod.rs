//! Forward-only schema migrations tracked in `schema_version`.

mod v001_graph_schema;

use rusqlite::{params, Connection};
use tracing::info;

use mnemo_core::errors::{MnemoResult, StorageError};

use crate::to_storage_err;

type MigrationFn = fn(&Connection) -> MnemoResult<()>;

const MIGRATIONS: &[(u32, &str, MigrationFn)] =
    &[(1, "graph_schema", v001_graph_schema::migrate)];

/// Latest schema version this build knows about.
pub const LATEST_VERSION: u32 = 1;

/// Apply every migration newer than the recorded version.
pub fn run_migrations(conn: &Connection) -> MnemoResult<u32> {
    apply_migrations(conn, MIGRATIONS)
}

/// Each migration and its `schema_version` row commit together, so a
/// failed or interrupted migration leaves the previous version intact.
fn apply_migrations(
    conn: &Connection,
    migrations: &[(u32, &str, MigrationFn)],
) -> MnemoResult<u32> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version     INTEGER PRIMARY KEY,
            applied_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let current = current_version(conn)?;
    for (version, name, migrate) in migrations {
        if *version <= current {
            continue;
        }
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| to_storage_err(e.to_string()))?;
        migrate(&tx).map_err(|e| StorageError::MigrationFailed {
            version: *version,
            reason: e.to_string(),
        })?;
        tx.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            params![version],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
        tx.commit().map_err(|e| to_storage_err(e.to_string()))?;
        info!(event = "migration_applied", version, name, "schema migration applied");
    }
    current_version(conn)
}

/// Highest applied version, 0 for a fresh database.
pub fn current_version(conn: &Connection) -> MnemoResult<u32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}
