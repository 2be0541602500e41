//! Loading a corpus of records
//!
//! A corpus is a JSON document whose top-level object holds an array of
//! records under a configurable key. Each record carries the object to
//! profile under a second key. Records without a usable payload are logged
//! and skipped; problems with the document itself are fatal.

use crate::error::{Error, Result};
use crate::types::ProfileConfig;
use serde_json::{Map, Value};
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Read the raw corpus bytes from `path`, or from stdin when `path` is `None`
pub fn read_source(path: Option<&Path>) -> Result<Vec<u8>> {
    let mut content = Vec::new();
    match path {
        Some(path) => {
            let unavailable = |source| Error::SourceUnavailable {
                source_name: path.display().to_string(),
                source,
            };
            let mut file = std::fs::File::open(path).map_err(unavailable)?;
            file.read_to_end(&mut content).map_err(unavailable)?;
        }
        None => {
            std::io::stdin()
                .read_to_end(&mut content)
                .map_err(|source| Error::SourceUnavailable {
                    source_name: String::from("stdin"),
                    source,
                })?;
        }
    }
    Ok(content)
}

/// Deepest nesting either parser is allowed to see; matches serde_json's recursion limit
pub const MAX_NESTING: usize = 128;

/// Parse a corpus document.
///
/// Uses SIMD-accelerated parsing first. simd-json has no recursion limit,
/// so documents nested deeper than [`MAX_NESTING`] go straight to
/// serde_json, which rejects them. simd-json rewrites its input in place,
/// so it works on a scratch copy and serde_json re-parses the original
/// bytes for the diagnostic when it fails.
pub fn parse_document(bytes: &[u8]) -> Result<Value> {
    if nesting_depth(bytes) > MAX_NESTING {
        debug!("Corpus nests deeper than {} levels, skipping SIMD parse", MAX_NESTING);
        return serde_json::from_slice(bytes).map_err(Error::MalformedCorpus);
    }

    let mut scratch = bytes.to_vec();
    match simd_json::serde::from_slice::<Value>(&mut scratch) {
        Ok(value) => Ok(value),
        Err(err) => {
            debug!("SIMD parse failed ({}), retrying with serde_json", err);
            serde_json::from_slice(bytes).map_err(Error::MalformedCorpus)
        }
    }
}

/// Maximum bracket nesting of `bytes`, ignoring brackets inside strings.
///
/// Stops counting once the limit is exceeded.
fn nesting_depth(bytes: &[u8]) -> usize {
    let mut depth = 0usize;
    let mut max_depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for &byte in bytes {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                max_depth = max_depth.max(depth);
                if max_depth > MAX_NESTING {
                    break;
                }
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    max_depth
}

/// The usable payloads of a corpus, in input order
#[derive(Debug)]
pub struct Corpus<'a> {
    payloads: Vec<&'a Map<String, Value>>,
    skipped: Vec<Error>,
}

impl<'a> Corpus<'a> {
    /// Validate the top-level shape of `document` and collect record payloads
    pub fn from_document(document: &'a Value, config: &ProfileConfig) -> Result<Self> {
        let top = document.as_object().ok_or_else(|| {
            Error::unexpected_shape(format!(
                "top level must be an object, found {}",
                crate::profile::classify(document)
            ))
        })?;

        let records = top
            .get(&config.records_key)
            .ok_or_else(|| {
                Error::unexpected_shape(format!("'{}' key missing", config.records_key))
            })?
            .as_array()
            .ok_or_else(|| {
                Error::unexpected_shape(format!("'{}' should be a list", config.records_key))
            })?;

        let mut payloads = Vec::with_capacity(records.len());
        let mut skipped = Vec::new();

        for (index, record) in records.iter().enumerate() {
            match payload_of(record, index, &config.payload_key) {
                Ok(payload) => payloads.push(payload),
                Err(err) => {
                    debug!("{}", err);
                    skipped.push(err);
                }
            }
        }

        if !skipped.is_empty() {
            warn!(
                "Skipped {} of {} records without a usable '{}' payload",
                skipped.len(),
                records.len(),
                config.payload_key
            );
        }

        Ok(Corpus { payloads, skipped })
    }

    pub fn payloads(&self) -> &[&'a Map<String, Value>] {
        &self.payloads
    }

    /// Per-record mismatches that were absorbed while loading
    pub fn skipped(&self) -> &[Error] {
        &self.skipped
    }
}

fn payload_of<'a>(
    record: &'a Value,
    index: usize,
    payload_key: &str,
) -> Result<&'a Map<String, Value>> {
    let mismatch = |reason: String| Error::RecordShapeMismatch { index, reason };

    let record = record.as_object().ok_or_else(|| {
        mismatch(format!(
            "record is {}, not an object",
            crate::profile::classify(record)
        ))
    })?;

    match record.get(payload_key) {
        Some(Value::Object(payload)) => Ok(payload),
        Some(other) => Err(mismatch(format!(
            "'{}' is {}, not an object",
            payload_key,
            crate::profile::classify(other)
        ))),
        None => Err(mismatch(format!("missing '{}'", payload_key))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collects_payloads_in_order() {
        let doc = json!({"favorites": [
            {"status": {"id": 1}},
            {"status": {"id": 2}}
        ]});
        let corpus = Corpus::from_document(&doc, &ProfileConfig::default()).unwrap();

        let ids: Vec<_> = corpus.payloads().iter().map(|p| p["id"].clone()).collect();
        assert_eq!(ids, vec![json!(1), json!(2)]);
        assert!(corpus.skipped().is_empty());
    }

    #[test]
    fn test_skips_records_without_payload() {
        let doc = json!({"favorites": [
            {"status": {"id": 1}},
            {"favid": 9},
            {"status": "deleted"},
            "garbage"
        ]});
        let corpus = Corpus::from_document(&doc, &ProfileConfig::default()).unwrap();

        assert_eq!(corpus.payloads().len(), 1);
        assert_eq!(corpus.skipped().len(), 3);
        assert!(corpus.skipped().iter().all(|err| !err.is_fatal()));
        assert!(matches!(
            corpus.skipped()[0],
            Error::RecordShapeMismatch { index: 1, .. }
        ));
    }

    #[test]
    fn test_missing_records_key() {
        let doc = json!({"statuses": []});
        let err = Corpus::from_document(&doc, &ProfileConfig::default()).unwrap_err();
        assert!(matches!(err, Error::UnexpectedTopShape { .. }));
    }

    #[test]
    fn test_records_key_not_a_list() {
        let doc = json!({"favorites": {"status": {}}});
        let err = Corpus::from_document(&doc, &ProfileConfig::default()).unwrap_err();
        assert!(err.to_string().contains("should be a list"));
    }

    #[test]
    fn test_top_level_not_an_object() {
        let doc = json!([{"status": {}}]);
        let err = Corpus::from_document(&doc, &ProfileConfig::default()).unwrap_err();
        assert!(matches!(err, Error::UnexpectedTopShape { .. }));
    }

    #[test]
    fn test_custom_keys() {
        let config = ProfileConfig {
            records_key: "statuses".to_string(),
            payload_key: "post".to_string(),
            ..ProfileConfig::default()
        };
        let doc = json!({"statuses": [{"post": {"id": 1}}, {"status": {"id": 2}}]});
        let corpus = Corpus::from_document(&doc, &config).unwrap();
        assert_eq!(corpus.payloads().len(), 1);
        assert_eq!(corpus.skipped().len(), 1);
    }

    #[test]
    fn test_parse_document() {
        let doc = parse_document(br#"{"favorites": [{"status": {"text": "hi"}}]}"#).unwrap();
        assert_eq!(doc["favorites"][0]["status"]["text"], json!("hi"));
    }

    #[test]
    fn test_parse_malformed_document() {
        let err = parse_document(b"{\"favorites\": [").unwrap_err();
        assert!(matches!(err, Error::MalformedCorpus(_)));
    }

    #[test]
    fn test_deeply_nested_document_is_malformed() {
        let depth = 200_000;
        let input = format!(
            r#"{{"favorites":[{{"status":{{"a":{}{}}}}}]}}"#,
            "[".repeat(depth),
            "]".repeat(depth)
        );
        let err = parse_document(input.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MalformedCorpus(_)));
    }

    #[test]
    fn test_nesting_past_limit_rejected_by_both_parsers() {
        let depth = 300;
        let input = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
        let err = parse_document(input.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MalformedCorpus(_)));
    }

    #[test]
    fn test_nesting_depth_ignores_brackets_in_strings() {
        assert_eq!(nesting_depth(br#"{"a": "[[[{{{", "b": [1]}"#), 2);
        assert_eq!(nesting_depth(br#"{"a": ""[[", "b": {}}"#), 2);
        assert_eq!(nesting_depth(b"42"), 0);
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_source(Some(Path::new("/nonexistent/full_favorites.json"))).unwrap_err();
        match err {
            Error::SourceUnavailable { source_name, .. } => {
                assert!(source_name.contains("full_favorites.json"));
            }
            other => panic!("Expected SourceUnavailable, got: {:?}", other),
        }
    }
}
