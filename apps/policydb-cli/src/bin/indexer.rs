use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use policydb_core::config::{resolve_with_base, Config, IndexConfig};
use policydb_index::{build_index, BuildOptions};

/// Build the presence-vector index over a directory of policy documents.
#[derive(Parser)]
#[command(name = "policydb-indexer")]
#[command(version)]
struct Cli {
    /// Directory holding the source `.txt` documents
    #[arg(long)]
    source_dir: Option<String>,
    /// Directory the index artifacts are written to
    #[arg(long)]
    output_dir: Option<String>,
    /// Upper bound on the number of vocabulary terms
    #[arg(long)]
    max_vocab_size: Option<usize>,
    /// Words per chunk
    #[arg(long)]
    window: Option<usize>,
    /// Words between the starts of consecutive chunks
    #[arg(long)]
    stride: Option<usize>,
    /// Do not draw a progress bar
    #[arg(long)]
    no_progress: bool,
}

fn main() -> ExitCode {
    policydb_cli::init_logging();
    policydb_cli::finish(run(Cli::parse()))
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    let cwd = std::env::current_dir().context("failed to read the current directory")?;
    // Validation happens in `build_index`, after the flags are applied.
    let configured = config.get::<IndexConfig>("index").context("failed to read the [index] settings")?.resolved(&cwd);
    let show_progress = !cli.no_progress;
    let index = apply_overrides(cli, configured, &cwd);

    println!("Policy Indexer\n==============");
    println!("Source directory: {}", index.source_directory.display());
    println!("Output directory: {}", index.output_directory.display());

    let summary = build_index(&index, BuildOptions { show_progress })?;

    println!("\nIndexing completed");
    println!("  documents:  {}", summary.documents);
    println!("  chunks:     {}", summary.chunks);
    println!("  vocabulary: {}", summary.vocab_size);
    println!("  written to: {}", summary.output_directory.display());
    Ok(())
}

/// Flags given on the command line win over the configured values.
fn apply_overrides(cli: Cli, mut index: IndexConfig, cwd: &Path) -> IndexConfig {
    if let Some(dir) = cli.source_dir { index.source_directory = resolve_with_base(cwd, dir); }
    if let Some(dir) = cli.output_dir { index.output_directory = resolve_with_base(cwd, dir); }
    if let Some(n) = cli.max_vocab_size { index.max_vocab_size = n; }
    if let Some(n) = cli.window { index.chunk_window_size = n; }
    if let Some(n) = cli.stride { index.chunk_stride = n; }
    index
}
