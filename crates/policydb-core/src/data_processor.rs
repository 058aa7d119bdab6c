//! Document loading and word-window chunking.
//!
//! Every `.txt` file directly inside the source directory becomes one
//! [`Document`]; each document is cut into overlapping windows of words and
//! every window becomes a [`Chunk`] with a build-wide sequential id.
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::{DEFAULT_CHUNK_STRIDE, DEFAULT_CHUNK_WINDOW_SIZE};
use crate::error::{Error, Result};
use crate::types::{Chunk, ChunkId, Document};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingConfig {
    /// Maximum number of words per chunk.
    pub window_size: usize,
    /// Words the window start advances by; `window_size - stride` words are shared.
    pub stride: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self { window_size: DEFAULT_CHUNK_WINDOW_SIZE, stride: DEFAULT_CHUNK_STRIDE }
    }
}

#[derive(Default)]
pub struct DataProcessor {
    chunking_config: ChunkingConfig,
}

impl DataProcessor {
    pub fn new(chunking_config: ChunkingConfig) -> Self { Self { chunking_config } }

    /// Loads and chunks a whole directory in one go.
    pub fn process_directory(&self, data_dir: &Path) -> Result<Vec<Chunk>> {
        let documents = self.load_documents(data_dir)?;
        Ok(self.chunk_documents(&documents))
    }

    /// Reads every `.txt` file directly inside `data_dir`, in path order.
    pub fn load_documents(&self, data_dir: &Path) -> Result<Vec<Document>> {
        if !data_dir.exists() {
            return Err(Error::NotFound(format!("source directory {}", data_dir.display())));
        }
        if !data_dir.is_dir() {
            return Err(Error::InvalidConfig(format!("{} is not a directory", data_dir.display())));
        }
        let files = self.list_txt_files(data_dir)?;
        if files.is_empty() {
            warn!(dir = %data_dir.display(), "no .txt files found");
            return Ok(vec![]);
        }
        let mut documents = Vec::with_capacity(files.len());
        for (file_index, file_path) in files.iter().enumerate() {
            debug!("Reading file {}/{}: {}", file_index + 1, files.len(), file_path.display());
            documents.push(Document { text: self.read_file_content(file_path)?, source: Self::source_name(file_path) });
        }
        info!("Read {} documents from {}", documents.len(), data_dir.display());
        Ok(documents)
    }

    /// Chunks documents in order; ids continue from one document to the next.
    pub fn chunk_documents(&self, documents: &[Document]) -> Vec<Chunk> {
        let chunks = documents.iter().fold(Vec::new(), |mut chunks, document| {
            let next_id = chunks.len();
            chunks.extend(self.chunk_document(document, next_id));
            chunks
        });
        info!("Created {} chunks from {} documents", chunks.len(), documents.len());
        chunks
    }

    /// Chunks one document, numbering its chunks from `first_id`.
    pub fn chunk_document(&self, document: &Document, first_id: ChunkId) -> Vec<Chunk> {
        self.split_with_overlap(&document.text)
            .into_iter()
            .enumerate()
            .map(|(offset, text)| Chunk { id: first_id + offset, text, source: document.source.clone() })
            .collect()
    }

    /// Splits on whitespace and emits windows of up to `window_size` words,
    /// advancing by `stride`. The window that reaches the last word is the
    /// final one, even when it is shorter than `window_size`.
    pub fn split_with_overlap(&self, text: &str) -> Vec<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let window = self.chunking_config.window_size.max(1);
        let stride = self.chunking_config.stride.max(1);
        let mut chunks = Vec::new(); let mut start = 0;
        while start < words.len() {
            let end = (start + window).min(words.len());
            chunks.push(words[start..end].join(" "));
            if end >= words.len() { break; }
            start += stride;
        }
        chunks
    }

    fn read_file_content(&self, file_path: &Path) -> Result<String> {
        let bytes = fs::read(file_path).map_err(|e| Error::io(file_path, e))?;
        match String::from_utf8(bytes) {
            Ok(content) => Ok(content),
            Err(err) => {
                warn!(file = %file_path.display(), "file is not valid UTF-8, decoding lossily");
                Ok(String::from_utf8_lossy(err.as_bytes()).into_owned())
            }
        }
    }

    fn source_name(file_path: &Path) -> String {
        file_path.file_name().map_or_else(|| file_path.to_string_lossy().into_owned(), |name| name.to_string_lossy().into_owned())
    }

    fn list_txt_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut txt_files = Vec::new();
        // Symlinked files count as documents; hidden files do not.
        for entry in walkdir::WalkDir::new(root).min_depth(1).max_depth(1).follow_links(true) {
            let entry = entry.map_err(|e| Error::io(root, e.into()))?;
            let path = entry.path();
            let hidden = entry.file_name().to_string_lossy().starts_with('.');
            if !hidden && entry.file_type().is_file() && path.extension().and_then(|s| s.to_str()) == Some("txt") { txt_files.push(path.to_path_buf()); }
        }
        txt_files.sort(); Ok(txt_files)
    }
}
