//! The four parallel columns and the operations that keep them aligned.

use serde::{Deserialize, Serialize};

use mnemo_core::errors::{MnemoResult, VectorError};
use mnemo_core::Properties;

/// Snapshot shape: `{documents, embeddings, metadatas, ids}`, all the same length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorTable {
    pub documents: Vec<String>,
    pub embeddings: Vec<Vec<f32>>,
    pub metadatas: Vec<Properties>,
    pub ids: Vec<String>,
}

impl VectorTable {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Error unless all four columns have the same length.
    pub fn check_aligned(&self) -> MnemoResult<()> {
        let n = self.ids.len();
        if self.documents.len() == n && self.embeddings.len() == n && self.metadatas.len() == n {
            Ok(())
        } else {
            Err(VectorError::Misaligned {
                ids: n,
                embeddings: self.embeddings.len(),
                documents: self.documents.len(),
                metadatas: self.metadatas.len(),
            }
            .into())
        }
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|x| x == id)
    }

    /// Insert a row, or overwrite the row that already has this id.
    pub fn upsert(&mut self, id: String, document: String, embedding: Vec<f32>, metadata: Properties) {
        match self.position(&id) {
            Some(i) => {
                self.documents[i] = document;
                self.embeddings[i] = embedding;
                self.metadatas[i] = metadata;
            }
            None => {
                self.ids.push(id);
                self.documents.push(document);
                self.embeddings.push(embedding);
                self.metadatas.push(metadata);
            }
        }
    }

    /// Remove the row with this id from all four columns.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(i) = self.position(id) else {
            return false;
        };
        self.ids.remove(i);
        self.documents.remove(i);
        self.embeddings.remove(i);
        self.metadatas.remove(i);
        true
    }

    /// Length of the first stored embedding.
    pub fn dimensions(&self) -> Option<usize> {
        self.embeddings.first().map(Vec::len)
    }
}
