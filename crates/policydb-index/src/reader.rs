//! Loading a persisted index and checking that its three artifacts agree.
//!
//! The artifacts carry no version or checksum, so `verify` is the only
//! guard a consumer has against a mismatched set. Any failed check is fatal.
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ndarray::Array2;
use ndarray_npy::ReadNpyExt;
use policydb_core::types::Chunk;
use policydb_core::{Error, Result};
use policydb_embed::Vocabulary;
use serde::Serialize;
use tracing::debug;

use crate::layout::IndexPaths;

pub struct IndexReader;

impl IndexReader {
    /// Reads all three artifacts from `dir` and verifies them.
    pub fn load(dir: &Path) -> Result<PolicyIndex> {
        let paths = IndexPaths::new(dir);
        for path in paths.all() {
            if !path.is_file() { return Err(Error::NotFound(format!("index artifact {}", path.display()))); }
        }
        let chunks: Vec<Chunk> = serde_json::from_reader(BufReader::new(open(&paths.chunks)?))
            .map_err(|e| Error::serialization(&paths.chunks, e))?;
        let terms: Vec<String> = serde_json::from_reader(BufReader::new(open(&paths.vocabulary)?))
            .map_err(|e| Error::serialization(&paths.vocabulary, e))?;
        let embeddings = Array2::<f64>::read_npy(BufReader::new(open(&paths.embeddings)?))
            .map_err(|e| Error::Npy { path: paths.embeddings.clone(), message: e.to_string() })?;
        let index = PolicyIndex { chunks, embeddings, vocabulary: Vocabulary::from_terms(terms)? };
        index.verify()?;
        debug!(dir = %dir.display(), chunks = index.chunks.len(), terms = index.vocabulary.len(), "index loaded");
        Ok(index)
    }
}

fn open(path: &Path) -> Result<File> { File::open(path).map_err(|e| Error::io(path, e)) }

/// An index held in memory: chunk `i` owns embedding row `i`, term `j`
/// owns column `j`.
#[derive(Debug, Clone)]
pub struct PolicyIndex {
    pub chunks: Vec<Chunk>,
    pub embeddings: Array2<f64>,
    pub vocabulary: Vocabulary,
}

impl PolicyIndex {
    pub fn verify(&self) -> Result<()> {
        let (rows, columns) = self.embeddings.dim();
        if rows != self.chunks.len() {
            return Err(Error::Integrity(format!("{} chunks but {} embedding rows", self.chunks.len(), rows)));
        }
        if columns != self.vocabulary.len() {
            return Err(Error::Integrity(format!("{} vocabulary terms but {} embedding columns", self.vocabulary.len(), columns)));
        }
        if let Some((position, chunk)) = self.chunks.iter().enumerate().find(|(position, chunk)| chunk.id != *position) {
            return Err(Error::Integrity(format!("chunk at position {position} has id {}", chunk.id)));
        }
        if let Some(((row, column), value)) = self.embeddings.indexed_iter().find(|(_, v)| **v != 0.0 && **v != 1.0) {
            return Err(Error::Integrity(format!("embedding[{row}][{column}] = {value} is not a presence flag")));
        }
        Ok(())
    }

    pub fn status(&self) -> IndexStatus {
        let mut sources = BTreeMap::new();
        for chunk in &self.chunks { *sources.entry(chunk.source.clone()).or_insert(0) += 1; }
        let (rows, columns) = self.embeddings.dim();
        IndexStatus { chunks: self.chunks.len(), vocab_size: self.vocabulary.len(), shape: [rows, columns], sources }
    }
}

/// Summary of a loaded index, as reported by `policydb-status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStatus {
    pub chunks: usize,
    pub vocab_size: usize,
    pub shape: [usize; 2],
    pub sources: BTreeMap<String, usize>,
}
