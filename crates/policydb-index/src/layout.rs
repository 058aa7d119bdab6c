use std::path::{Path, PathBuf};

pub const CHUNKS_FILE: &str = "chunks.json";
pub const EMBEDDINGS_FILE: &str = "embeddings.npy";
pub const VOCABULARY_FILE: &str = "vocabulary.json";

/// Locations of the three artifacts that together form one index.
///
/// Row `i` of `embeddings` belongs to record `i` of `chunks`; column `j`
/// belongs to term `j` of `vocabulary`. None of the files is meaningful
/// without the other two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexPaths {
    pub chunks: PathBuf,
    pub embeddings: PathBuf,
    pub vocabulary: PathBuf,
}

impl IndexPaths {
    pub fn new(dir: &Path) -> Self {
        Self {
            chunks: dir.join(CHUNKS_FILE),
            embeddings: dir.join(EMBEDDINGS_FILE),
            vocabulary: dir.join(VOCABULARY_FILE),
        }
    }

    pub fn all(&self) -> [&Path; 3] { [&self.chunks, &self.embeddings, &self.vocabulary] }
}
