use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use ndarray::Array2;
use ndarray_npy::WriteNpyExt;
use policydb_core::types::Chunk;
use policydb_core::{Error, Result};
use policydb_embed::Vocabulary;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::layout::IndexPaths;

/// Writes chunks, embedding matrix and vocabulary into one directory.
///
/// All three artifacts are staged as temporary files next to their final
/// names and only renamed into place once every one of them has been
/// written and synced. A failure or interruption before that point leaves
/// whatever index was there before untouched.
pub struct IndexWriter { output_dir: PathBuf }

impl IndexWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self { Self { output_dir: output_dir.into() } }

    pub fn write(&self, chunks: &[Chunk], embeddings: &Array2<f64>, vocabulary: &Vocabulary) -> Result<IndexPaths> {
        let (rows, columns) = embeddings.dim();
        if rows != chunks.len() {
            return Err(Error::Integrity(format!("{} chunks but {} embedding rows", chunks.len(), rows)));
        }
        if columns != vocabulary.len() {
            return Err(Error::Integrity(format!("{} vocabulary terms but {} embedding columns", vocabulary.len(), columns)));
        }
        fs::create_dir_all(&self.output_dir).map_err(|e| Error::io(&self.output_dir, e))?;
        let paths = IndexPaths::new(&self.output_dir);

        let staged_chunks = self.stage(&paths.chunks, |w| {
            serde_json::to_writer_pretty(&mut *w, chunks).map_err(|e| Error::serialization(&paths.chunks, e))?;
            w.write_all(b"\n").map_err(|e| Error::io(&paths.chunks, e))
        })?;
        let staged_embeddings = self.stage(&paths.embeddings, |w| {
            embeddings.write_npy(w).map_err(|e| Error::Npy { path: paths.embeddings.clone(), message: e.to_string() })
        })?;
        let staged_vocabulary = self.stage(&paths.vocabulary, |w| {
            serde_json::to_writer_pretty(&mut *w, vocabulary.terms()).map_err(|e| Error::serialization(&paths.vocabulary, e))?;
            w.write_all(b"\n").map_err(|e| Error::io(&paths.vocabulary, e))
        })?;

        for (staged, target) in [(staged_chunks, &paths.chunks), (staged_embeddings, &paths.embeddings), (staged_vocabulary, &paths.vocabulary)] {
            staged.persist(target).map_err(|e| Error::io(target, e.error))?;
            debug!(file = %target.display(), "committed");
        }
        info!("Wrote index of {} chunks x {} terms to {}", rows, columns, self.output_dir.display());
        Ok(paths)
    }

    fn stage<F>(&self, target: &Path, write: F) -> Result<NamedTempFile>
    where
        F: FnOnce(&mut dyn Write) -> Result<()>,
    {
        let mut staged = tempfile::Builder::new()
            .prefix(".policydb-")
            .suffix(".tmp")
            .tempfile_in(&self.output_dir)
            .map_err(|e| Error::io(&self.output_dir, e))?;
        {
            let mut writer = BufWriter::new(staged.as_file_mut());
            write(&mut writer)?;
            writer.flush().map_err(|e| Error::io(target, e))?;
        }
        staged.as_file().sync_all().map_err(|e| Error::io(target, e))?;
        Ok(staged)
    }
}
