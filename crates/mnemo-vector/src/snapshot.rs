//! Snapshot persistence: whole-table JSON, written to a temp file, synced,
//! then renamed over the target.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tracing::debug;

use mnemo_core::errors::{MnemoResult, VectorError};

use crate::table::VectorTable;

fn snapshot_err(path: &Path, reason: impl ToString) -> VectorError {
    VectorError::Snapshot {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Load a snapshot. A missing file is an empty table; a malformed or
/// misaligned one is an error.
pub async fn load(path: &Path) -> MnemoResult<VectorTable> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(VectorTable::default()),
        Err(e) => return Err(snapshot_err(path, e).into()),
    };
    let table: VectorTable =
        serde_json::from_slice(&bytes).map_err(|e| snapshot_err(path, e))?;
    table.check_aligned()?;
    debug!(path = %path.display(), rows = table.len(), "vector snapshot loaded");
    Ok(table)
}

/// Replace the snapshot at `path` with `table`.
pub async fn save(path: &Path, table: &VectorTable) -> MnemoResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| snapshot_err(path, e))?;
    }
    let json = serde_json::to_vec(table)?;
    let tmp = temp_path(path);

    let mut file = tokio::fs::File::create(&tmp)
        .await
        .map_err(|e| snapshot_err(&tmp, e))?;
    file.write_all(&json).await.map_err(|e| snapshot_err(&tmp, e))?;
    file.sync_all().await.map_err(|e| snapshot_err(&tmp, e))?;
    drop(file);

    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| snapshot_err(path, e))?;
    debug!(
        event = "snapshot_written",
        path = %path.display(),
        rows = table.len(),
        bytes = json.len(),
        "vector snapshot written"
    );
    Ok(())
}
