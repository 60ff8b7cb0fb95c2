use mnemo_core::errors::MnemoResult;
use mnemo_core::Properties;
use mnemo_vector::VectorIndex;

use crate::results::SemanticResults;

/// Nearest `limit` memories to `query` matching `filter`.
pub async fn search(
    vectors: &VectorIndex,
    query: &str,
    limit: usize,
    filter: &Properties,
) -> MnemoResult<SemanticResults> {
    let hits = vectors.query(query, limit, filter).await?;
    let scores = hits.similarities();
    Ok(SemanticResults {
        ids: hits.ids,
        documents: hits.documents,
        metadatas: hits.metadatas,
        scores,
    })
}
