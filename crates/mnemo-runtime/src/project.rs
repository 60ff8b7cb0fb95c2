//! Bulk ingestion of a project's source files.
//!
//! The caller picks the files; this module reads each one, stores it as a
//! code memory, and links it under a Project entity.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use mnemo_core::constants::{meta_keys, ENTITY_PROJECT, MEMORY_TYPE_CODE, REL_CONTAINS_FILE};
use mnemo_core::errors::{ExchangeError, IngestError, MnemoError, MnemoResult};
use mnemo_core::graph::{NewEntity, NewRelationship};
use mnemo_core::memory::file_entity_id;
use mnemo_core::properties::props_from;
use mnemo_core::Properties;
use mnemo_ingest::IngestionCoordinator;
use mnemo_storage::GraphStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectImportReport {
    pub project_id: String,
    /// Files stored as memories, including any stored without graph links.
    pub imported: usize,
    /// Files skipped because they could not be read or stored.
    pub failed: usize,
}

fn project_name(root: &Path) -> MnemoResult<String> {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            ExchangeError::Project {
                path: root.display().to_string(),
                reason: "project root has no final path component".to_string(),
            }
            .into()
        })
}

pub async fn import_project(
    ingest: &IngestionCoordinator,
    graph: &GraphStore,
    root: &Path,
    files: &[PathBuf],
) -> MnemoResult<ProjectImportReport> {
    let name = project_name(root)?;
    let project_id = format!("project:{name}");
    let root_display = root.display().to_string();
    graph
        .create_entity(&NewEntity::new(
            project_id.clone(),
            ENTITY_PROJECT,
            name.clone(),
            props_from([("path", root_display.as_str())]),
        ))
        .await?;

    let mut report = ProjectImportReport {
        project_id: project_id.clone(),
        imported: 0,
        failed: 0,
    };

    for file in files {
        let path = file.display().to_string();
        let content = match tokio::fs::read_to_string(file).await {
            Ok(content) => content,
            Err(e) => {
                warn!(event = "file_skipped", path = %path, error = %e, "unreadable project file");
                report.failed += 1;
                continue;
            }
        };

        let relative = file
            .strip_prefix(root)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| path.clone());
        let metadata = props_from([
            (meta_keys::FILE_PATH, path.as_str()),
            (meta_keys::RELATIVE_PATH, relative.as_str()),
            (meta_keys::PROJECT, name.as_str()),
            (meta_keys::TYPE, MEMORY_TYPE_CODE),
        ]);

        match ingest.store(&content, metadata).await {
            Ok(_) => {}
            Err(MnemoError::IngestError(IngestError::PartialIngest { memory_id, reason })) => {
                warn!(
                    event = "file_partially_ingested",
                    path = %path,
                    memory_id = %memory_id,
                    reason = %reason,
                    "project file stored without graph links"
                );
            }
            Err(e) => {
                warn!(event = "file_skipped", path = %path, error = %e, "project file not stored");
                report.failed += 1;
                continue;
            }
        }
        report.imported += 1;

        graph
            .create_relationship(&NewRelationship::new(
                project_id.clone(),
                file_entity_id(&path),
                REL_CONTAINS_FILE,
                Properties::new(),
            ))
            .await?;
    }

    info!(
        event = "project_imported",
        project_id = %project_id,
        imported = report.imported,
        failed = report.failed,
        "project imported"
    );
    Ok(report)
}
