/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("invalid query options: {reason}")]
    InvalidOptions { reason: String },

    #[error("search failed: {reason}")]
    SearchFailed { reason: String },
}
