use indicatif::ProgressBar;
use ndarray::{Array2, ArrayView1};
use policydb_core::traits::Embedder;
use policydb_core::types::Chunk;
use policydb_core::{Error, Result};

use crate::tokenize::terms;
use crate::vocabulary::Vocabulary;

/// Binary bag-of-words encoder: column `j` is 1.0 when `vocabulary[j]`
/// occurs in the text at least once, 0.0 otherwise.
#[derive(Debug, Clone)]
pub struct PresenceEncoder {
    vocabulary: Vocabulary,
}

impl PresenceEncoder {
    pub fn new(vocabulary: Vocabulary) -> Self { Self { vocabulary } }

    /// Builds the vocabulary from `chunks` and wraps it in an encoder.
    pub fn fit(chunks: &[Chunk], max_vocab_size: usize) -> Self {
        Self::new(Vocabulary::build(chunks, max_vocab_size))
    }

    pub fn vocabulary(&self) -> &Vocabulary { &self.vocabulary }

    pub fn into_vocabulary(self) -> Vocabulary { self.vocabulary }
}

impl Embedder for PresenceEncoder {
    fn dim(&self) -> usize { self.vocabulary.len() }

    fn embed_text(&self, text: &str) -> Vec<f64> {
        let mut vector = vec![0.0; self.dim()];
        for term in terms(text) {
            if let Some(column) = self.vocabulary.column(&term) { vector[column] = 1.0; }
        }
        vector
    }
}

/// Stacks one embedding row per chunk, row `i` for `chunks[i]`.
///
/// The result always has shape `(chunks.len(), embedder.dim())`; a row of the
/// wrong length is reported rather than reshaped.
pub fn encode_chunks(embedder: &dyn Embedder, chunks: &[Chunk], progress: &ProgressBar) -> Result<Array2<f64>> {
    let dim = embedder.dim();
    let mut matrix = Array2::zeros((chunks.len(), dim));
    for (row_index, chunk) in chunks.iter().enumerate() {
        let row = embedder.embed_text(&chunk.text);
        if row.len() != dim {
            return Err(Error::Integrity(format!("chunk {} encoded to {} values, expected {}", chunk.id, row.len(), dim)));
        }
        matrix.row_mut(row_index).assign(&ArrayView1::from(&row[..]));
        progress.inc(1);
    }
    progress.finish_and_clear();
    Ok(matrix)
}
