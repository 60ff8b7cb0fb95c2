/// Vector index errors.
#[derive(Debug, thiserror::Error)]
pub enum VectorError {
    #[error(
        "misaligned vector table: {ids} ids, {embeddings} embeddings, \
         {documents} documents, {metadatas} metadatas"
    )]
    Misaligned {
        ids: usize,
        embeddings: usize,
        documents: usize,
        metadatas: usize,
    },

    #[error("argument length mismatch: {documents} documents but {other} {what}")]
    ArgumentLength {
        documents: usize,
        other: usize,
        what: &'static str,
    },

    #[error("snapshot {path}: {reason}")]
    Snapshot { path: String, reason: String },
}
