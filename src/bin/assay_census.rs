//! assay-census: Count the sub-keys found under a named field
//!
//! Usage:
//!   # Which keys appear inside every `page_info` object?
//!   assay-census --key page_info full_favorites.json
//!
//!   # Read from stdin with compact output
//!   cat full_favorites.json | assay-census --key media_info --compact
//!
//! Logging goes to stderr at info level. Per-record skip messages are logged
//! at debug level under the `assay` target: `RUST_LOG=assay=debug`.

use anyhow::{Context, Result};
use assay::KeyCensus;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "assay-census")]
#[command(about = "Count the keys found under every occurrence of a field", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Field whose sub-keys are counted
    #[arg(long, short = 'k')]
    key: String,

    /// Compact output (no pretty-printing)
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let bytes = assay::read_source(args.input.as_deref())?;
    let document = assay::parse_document(&bytes).context("Failed to parse corpus")?;

    let mut census = KeyCensus::new(&args.key);
    census.add_value(&document);
    info!("Found '{}' {} times", args.key, census.matches());

    let output = if args.compact {
        serde_json::to_string(census.counts())?
    } else {
        serde_json::to_string_pretty(census.counts())?
    };
    println!("{}", output);

    Ok(())
}
