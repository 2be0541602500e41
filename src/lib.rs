//! # Assay - Structural Profiling for JSON Corpora
//!
//! Profiles a corpus of loosely-schematized JSON records: for every field
//! path it reports how often the field appears, which value types it takes,
//! and a recursive profile of its structured values.
//!
//! ## Modules
//!
//! - **profile**: type classification, merge policies, accumulation and finalization
//! - **corpus**: reading and validating the input document
//! - **census**: tally the sub-keys found under a named field
//!
//! ## Quick Start
//!
//! ```rust
//! use assay::{profile_document, ProfileConfig};
//! use serde_json::json;
//!
//! # fn main() -> assay::Result<()> {
//! let corpus = json!({"favorites": [
//!     {"status": {"text": "hi", "user": {"id": 1}}},
//!     {"status": {"text": "yo"}}
//! ]});
//!
//! let report = profile_document(&corpus, &ProfileConfig::default())?;
//! assert_eq!(report.total_posts, 2);
//! assert_eq!(report.post_structure["user"].frequency, "50.00%");
//! # Ok(())
//! # }
//! ```

use serde_json::Value;
use std::io::Write;
use std::path::Path;
use tracing::info;

pub mod census;
pub mod corpus;
pub mod error;
pub mod profile;
pub mod types;

// Re-export commonly used types for convenience
pub use census::{census, KeyCensus};
pub use corpus::{parse_document, read_source, Corpus};
pub use error::{Error, Result};
pub use profile::{classify, MergePolicy, PolicyTable, StructureProfiler, TypeTag};
pub use types::{ProfileConfig, ProfileReport, SchemaNode, Structure};

/// Profile every usable record of a parsed corpus document
pub fn profile_document(document: &Value, config: &ProfileConfig) -> Result<ProfileReport> {
    let corpus = Corpus::from_document(document, config)?;
    let mut profiler = StructureProfiler::new(config.policies.clone());

    for payload in corpus.payloads() {
        profiler.add_record(payload);
    }
    for _ in corpus.skipped() {
        profiler.skip_record();
    }

    let report = profiler.finish();
    info!(
        "Profiled {} records ({} skipped), {} top-level fields",
        report.total_posts,
        report.skipped_records,
        report.post_structure.len()
    );
    Ok(report)
}

/// Parse and profile a corpus held in memory
pub fn profile_bytes(bytes: &[u8], config: &ProfileConfig) -> Result<ProfileReport> {
    let document = parse_document(bytes)?;
    profile_document(&document, config)
}

/// Read, parse and profile a corpus from `path`, or stdin when `path` is `None`
pub fn profile_source(path: Option<&Path>, config: &ProfileConfig) -> Result<ProfileReport> {
    let bytes = read_source(path)?;
    profile_bytes(&bytes, config)
}

/// Write `report` as JSON, pretty-printed unless `compact` is set
pub fn write_report<W: Write>(report: &ProfileReport, mut writer: W, compact: bool) -> Result<()> {
    if compact {
        serde_json::to_writer(&mut writer, report).map_err(Error::Serialize)?;
    } else {
        serde_json::to_writer_pretty(&mut writer, report).map_err(Error::Serialize)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_end_to_end_profile() {
        let input = json!({"favorites": [
            {"status": {"text": "hi", "user": {"id": 1}}},
            {"status": {"text": "yo"}}
        ]});

        let report = profile_document(&input, &ProfileConfig::default()).unwrap();
        assert_eq!(report.total_posts, 2);

        let text = &report.post_structure["text"];
        assert_eq!(text.count, 2);
        assert_eq!(text.frequency, "100.00%");
        assert_eq!(text.types.get("string"), Some(&2));
        assert!(text.children.is_none());

        let user = &report.post_structure["user"];
        assert_eq!(user.count, 1);
        assert_eq!(user.frequency, "50.00%");

        let id = report.node(&["user", "id"]).unwrap();
        assert_eq!(id.count, 1);
        assert_eq!(id.frequency, "100.00%");
        assert_eq!(id.types.get("number"), Some(&1));
    }

    #[test]
    fn test_missing_records_key_is_fatal() {
        let input = json!({"statuses": []});
        let err = profile_document(&input, &ProfileConfig::default()).unwrap_err();
        assert!(matches!(err, Error::UnexpectedTopShape { .. }));
    }

    #[test]
    fn test_skipped_records_excluded_from_total() {
        let input = json!({"favorites": [
            {"status": {"text": "a"}},
            {"status": null},
            {}
        ]});

        let report = profile_document(&input, &ProfileConfig::default()).unwrap();
        assert_eq!(report.total_posts, 1);
        assert_eq!(report.skipped_records, 2);
        assert_eq!(report.post_structure["text"].frequency, "100.00%");
    }

    #[test]
    fn test_empty_corpus() {
        let report = profile_bytes(br#"{"favorites": []}"#, &ProfileConfig::default()).unwrap();
        assert_eq!(report.total_posts, 0);
        assert!(report.post_structure.is_empty());
    }

    #[test]
    fn test_write_report_shape() {
        let input = json!({"favorites": [{"status": {"text": "hi"}}]});
        let report = profile_document(&input, &ProfileConfig::default()).unwrap();

        let mut buffer = Vec::new();
        write_report(&report, &mut buffer, true).unwrap();
        let written: Value = serde_json::from_slice(&buffer).unwrap();

        assert_eq!(
            written,
            json!({
                "total_posts": 1,
                "post_structure": {
                    "text": {"count": 1, "frequency": "100.00%", "types": {"string": 1}}
                }
            })
        );
    }
}
