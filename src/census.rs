//! Key census: which sub-keys appear under a given field
//!
//! Walks a whole document and, for every field named `target`, tallies the
//! keys of its object value (or of each object item when the value is an
//! array). Useful for surveying variant payloads such as `page_info` or
//! `media_info` across a corpus.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Tally of sub-keys observed under every occurrence of one field
#[derive(Debug, Clone)]
pub struct KeyCensus {
    target: String,
    counts: BTreeMap<String, usize>,
    matches: usize,
}

impl KeyCensus {
    pub fn new(target: impl Into<String>) -> Self {
        KeyCensus {
            target: target.into(),
            counts: BTreeMap::new(),
            matches: 0,
        }
    }

    /// Walk `value` and tally every occurrence of the target field
    pub fn add_value(&mut self, value: &Value) {
        match value {
            Value::Object(obj) => self.add_object(obj),
            Value::Array(items) => {
                for item in items {
                    self.add_value(item);
                }
            }
            _ => {}
        }
    }

    fn add_object(&mut self, obj: &Map<String, Value>) {
        for (key, value) in obj {
            if *key == self.target {
                self.matches += 1;
                self.tally(value);
            } else {
                self.add_value(value);
            }
        }
    }

    fn tally(&mut self, value: &Value) {
        let objects: Vec<&Map<String, Value>> = match value {
            Value::Object(obj) => vec![obj],
            Value::Array(items) => items.iter().filter_map(Value::as_object).collect(),
            _ => return,
        };

        for obj in objects {
            for key in obj.keys() {
                *self.counts.entry(key.clone()).or_insert(0) += 1;
            }
        }
    }

    /// Number of times the target field was found
    pub fn matches(&self) -> usize {
        self.matches
    }

    pub fn counts(&self) -> &BTreeMap<String, usize> {
        &self.counts
    }

    pub fn into_counts(self) -> BTreeMap<String, usize> {
        self.counts
    }
}

/// Count the sub-keys of every `target` field in `document`
pub fn census(document: &Value, target: &str) -> BTreeMap<String, usize> {
    let mut census = KeyCensus::new(target);
    census.add_value(document);
    census.into_counts()
}
