//! Single write connection behind `tokio::sync::Mutex`.

use std::path::Path;

use rusqlite::Connection;
use tokio::sync::Mutex;

use mnemo_core::errors::MnemoResult;

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

/// A single write connection protected by an async mutex.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open a new write connection to the given database path.
    pub fn open(path: &Path) -> MnemoResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database.
    pub fn open_in_memory() -> MnemoResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the write lock and execute a closure with the connection.
    pub async fn with_conn<F, T>(&self, f: F) -> MnemoResult<T>
    where
        F: FnOnce(&Connection) -> MnemoResult<T>,
    {
        let guard = self.conn.lock().await;
        f(&guard)
    }

    /// Mutable access, needed to open a transaction.
    pub async fn with_conn_mut<F, T>(&self, f: F) -> MnemoResult<T>
    where
        F: FnOnce(&mut Connection) -> MnemoResult<T>,
    {
        let mut guard = self.conn.lock().await;
        f(&mut guard)
    }

    /// Synchronous access for startup work such as migrations. Fails
    /// rather than blocks if the connection is already in use, so it is
    /// safe to call from inside an async runtime.
    pub fn with_conn_sync<F, T>(&self, f: F) -> MnemoResult<T>
    where
        F: FnOnce(&Connection) -> MnemoResult<T>,
    {
        let guard = self
            .conn
            .try_lock()
            .map_err(|_| to_storage_err("write connection busy during synchronous access"))?;
        f(&guard)
    }
}
