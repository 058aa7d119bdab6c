//! Domain types shared by the loader, chunker, encoder and index writer.

use serde::{Deserialize, Serialize};

/// Dense row index into the embedding matrix.
pub type ChunkId = usize;

/// Raw text of one source file.
///
/// `source` is the file's base name and becomes the provenance of every
/// chunk cut from it. Documents are never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub text: String,
    pub source: String,
}

/// A word window of a source document, the unit that gets indexed.
///
/// - `id`: position of the chunk across the whole build; ids are `0..n`
///   with no gaps, so `id` is also the chunk's row in the embedding matrix
/// - `text`: the window's words joined by single spaces
/// - `source`: base name of the originating file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: ChunkId,
    pub text: String,
    pub source: String,
}
