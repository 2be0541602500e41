//! assay-profile: Profile the field structure of a JSON corpus
//!
//! Reads a document of the form `{"favorites": [{"status": {...}}, ...]}`
//! and reports, for every field path, its count, frequency and value types.
//!
//! Usage:
//!   # Read from file, output to stdout
//!   assay-profile full_favorites.json
//!
//!   # Write the report to a file
//!   assay-profile full_favorites.json -o analysis_result.json
//!
//!   # Profile a different layout and treat `quoted_status` as a repost
//!   assay-profile --records-key statuses --payload-key post --merge-fields quoted_status data.json
//!
//! Logging goes to stderr at info level. Per-record skip messages are logged
//! at debug level under the `assay` target: `RUST_LOG=assay=debug`.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use assay::{MergePolicy, PolicyTable, ProfileConfig};
use clap::Parser;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "assay-profile")]
#[command(about = "Profile field frequencies and types across a JSON corpus", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Write the report here instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Compact output (no pretty-printing)
    #[arg(long)]
    compact: bool,

    /// Top-level key holding the array of records (default: "favorites")
    #[arg(long)]
    records_key: Option<String>,

    /// Key inside each record holding the object to profile (default: "status")
    #[arg(long)]
    payload_key: Option<String>,

    /// Comma-separated fields whose contents merge into the enclosing scope
    #[arg(long)]
    merge_fields: Option<String>,

    /// Comma-separated fields whose object values are profiled as anonymous items
    #[arg(long)]
    collection_fields: Option<String>,

    /// Start from an empty policy table instead of the built-in rules
    #[arg(long)]
    no_default_policies: bool,
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
    let config = build_config(&args);

    let report = assay::profile_source(args.input.as_deref(), &config)
        .context("Failed to profile corpus")?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            assay::write_report(&report, BufWriter::new(file), args.compact)?;
            info!("Report written to {}", path.display());
        }
        None => assay::write_report(&report, std::io::stdout().lock(), args.compact)?,
    }

    Ok(())
}

fn build_config(args: &Args) -> ProfileConfig {
    let mut config = ProfileConfig::default();
    if let Some(key) = &args.records_key {
        config.records_key = key.clone();
    }
    if let Some(key) = &args.payload_key {
        config.payload_key = key.clone();
    }
    if args.no_default_policies {
        config.policies = PolicyTable::empty();
    }
    for field in split_fields(args.merge_fields.as_deref()) {
        config.policies.insert(field, MergePolicy::MergeIntoParent);
    }
    for field in split_fields(args.collection_fields.as_deref()) {
        config.policies.insert(field, MergePolicy::AnonymousCollection);
    }
    config
}

fn split_fields(list: Option<&str>) -> Vec<String> {
    list.map(|fields| {
        fields
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
    .unwrap_or_default()
}
