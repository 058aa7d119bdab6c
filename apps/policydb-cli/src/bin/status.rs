use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use policydb_core::config::{resolve_with_base, Config};
use policydb_index::IndexReader;

/// Load and verify a built index, then report what it contains.
#[derive(Parser)]
#[command(name = "policydb-status")]
#[command(version)]
struct Cli {
    /// Index directory; defaults to the configured output directory
    #[arg(long)]
    index_dir: Option<String>,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    policydb_cli::init_logging();
    policydb_cli::finish(run(Cli::parse()))
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let dir = match cli.index_dir {
        Some(dir) => resolve_with_base(&std::env::current_dir().context("failed to read the current directory")?, dir),
        None => {
            let config = Config::load().context("failed to load configuration")?;
            config.index().context("invalid index configuration")?.output_directory
        }
    };

    let index = IndexReader::load(&dir).with_context(|| format!("failed to load index from {}", dir.display()))?;
    let status = index.status();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("Index: {}", dir.display());
    println!("  chunks:     {}", status.chunks);
    println!("  vocabulary: {}", status.vocab_size);
    println!("  matrix:     {} x {}", status.shape[0], status.shape[1]);
    if !status.sources.is_empty() {
        println!("  sources:");
        for (source, chunks) in &status.sources { println!("    {source}: {chunks}"); }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() { Cli::command().debug_assert(); }
}
