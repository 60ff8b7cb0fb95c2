/// Export/import errors.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    #[error("unsupported export version: {version}")]
    UnsupportedVersion { version: String },

    #[error("malformed export document: {reason}")]
    Malformed { reason: String },

    #[error("project import failed for {path}: {reason}")]
    Project { path: String, reason: String },
}
