//! End-to-end index build: load -> chunk -> vocabulary -> encode -> write.
//!
//! Every stage runs to completion on the full output of the previous one.
//! A failing stage aborts the build before anything is committed, and the
//! error names the stage and the path involved.
use std::path::PathBuf;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use policydb_core::config::IndexConfig;
use policydb_core::data_processor::DataProcessor;
use policydb_embed::{encode_chunks, Embedder, PresenceEncoder};
use serde::Serialize;
use tracing::{info, warn};

use crate::writer::IndexWriter;

#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Draw a progress bar on stderr while encoding.
    pub show_progress: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildSummary {
    pub documents: usize,
    pub chunks: usize,
    pub vocab_size: usize,
    pub output_directory: PathBuf,
}

pub fn build_index(config: &IndexConfig, options: BuildOptions) -> Result<BuildSummary> {
    config.validate().context("invalid index configuration")?;
    let processor = DataProcessor::new(config.chunking());

    info!(stage = "load", dir = %config.source_directory.display(), "reading documents");
    let documents = processor
        .load_documents(&config.source_directory)
        .with_context(|| format!("load stage failed for {}", config.source_directory.display()))?;

    info!(stage = "chunk", window = config.chunk_window_size, stride = config.chunk_stride, "chunking documents");
    let chunks = processor.chunk_documents(&documents);
    if chunks.is_empty() { warn!("corpus has no words; writing an empty index"); }

    info!(stage = "vocabulary", max_vocab_size = config.max_vocab_size, "building vocabulary");
    let encoder = PresenceEncoder::fit(&chunks, config.max_vocab_size);
    info!("Vocabulary holds {} terms", encoder.dim());

    info!(stage = "encode", chunks = chunks.len(), "encoding presence vectors");
    let progress = progress_bar(chunks.len(), options.show_progress);
    let embeddings = encode_chunks(&encoder, &chunks, &progress).context("encode stage failed")?;
    let vocabulary = encoder.into_vocabulary();

    info!(stage = "write", dir = %config.output_directory.display(), "writing index");
    IndexWriter::new(&config.output_directory)
        .write(&chunks, &embeddings, &vocabulary)
        .with_context(|| format!("write stage failed for {}", config.output_directory.display()))?;

    Ok(BuildSummary {
        documents: documents.len(),
        chunks: chunks.len(),
        vocab_size: vocabulary.len(),
        output_directory: config.output_directory.clone(),
    })
}

fn progress_bar(len: usize, visible: bool) -> ProgressBar {
    if !visible { return ProgressBar::hidden(); }
    let pb = ProgressBar::new(len as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({percent}%)")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}
