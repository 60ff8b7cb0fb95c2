/// Ingestion errors.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The vector write succeeded but the graph write did not. The memory
    /// stays searchable by similarity without structural links.
    #[error("memory {memory_id} stored without graph links: {reason}")]
    PartialIngest { memory_id: String, reason: String },
}
