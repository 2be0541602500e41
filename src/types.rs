use crate::profile::PolicyTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fields of one scope in a finished report, ordered by name
pub type Structure = BTreeMap<String, SchemaNode>;

/// Profile of a single field at one nesting level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaNode {
    /// Number of times the field was present in the owning scope
    pub count: usize,

    /// `count` over the owning scope's total, e.g. "50.00%"
    pub frequency: String,

    /// Occurrences per type tag; sums to `count`
    pub types: BTreeMap<String, usize>,

    /// Profile of the field's structured values, if it ever had any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Structure>,
}

/// Finished profile of a corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileReport {
    /// Number of records that were profiled
    pub total_posts: usize,

    pub post_structure: Structure,

    /// Records excluded because they had no usable payload
    #[serde(skip)]
    pub skipped_records: usize,
}

impl ProfileReport {
    /// Look up a node by its field path, e.g. `&["user", "id"]`
    pub fn node(&self, path: &[&str]) -> Option<&SchemaNode> {
        let (first, rest) = path.split_first()?;
        let mut node = self.post_structure.get(*first)?;
        for name in rest {
            node = node.children.as_ref()?.get(*name)?;
        }
        Some(node)
    }
}

/// Configuration for a profiling run
#[derive(Debug, Clone)]
pub struct ProfileConfig {
    /// Top-level key holding the array of records
    pub records_key: String,

    /// Key inside each record holding the object to profile
    pub payload_key: String,

    /// Merge policies for structured fields
    pub policies: PolicyTable,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        ProfileConfig {
            records_key: String::from("favorites"),
            payload_key: String::from("status"),
            policies: PolicyTable::default(),
        }
    }
}
