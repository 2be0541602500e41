//! Per-field merge policies
//!
//! Some fields carry structured values that should not become an ordinary
//! child scope. The [`PolicyTable`] maps literal field names to the policy
//! the profiler applies to their object values.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Field holding an embedded repost with the same shape as its parent record
pub const REPOST_FIELD: &str = "retweeted_status";

/// Field mapping opaque picture ids to per-picture payloads
pub const PICTURE_FIELD: &str = "pic_infos";

static DEFAULT_POLICIES: Lazy<PolicyTable> = Lazy::new(|| {
    PolicyTable::empty()
        .with_rule(REPOST_FIELD, MergePolicy::MergeIntoParent)
        .with_rule(PICTURE_FIELD, MergePolicy::AnonymousCollection)
});

/// How an object-valued field is routed through the accumulator tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// Profile the object into the field's own children scope
    #[default]
    Default,
    /// Profile the object's contents into the scope that holds the field
    MergeIntoParent,
    /// Ignore the object's keys; profile each object value as one item of the children scope
    AnonymousCollection,
}

/// Lookup table from field name to [`MergePolicy`]
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyTable {
    rules: HashMap<String, MergePolicy>,
}

impl PolicyTable {
    /// A table where every field gets [`MergePolicy::Default`]
    pub fn empty() -> Self {
        PolicyTable {
            rules: HashMap::new(),
        }
    }

    /// Add or replace the rule for `field`
    pub fn with_rule(mut self, field: impl Into<String>, policy: MergePolicy) -> Self {
        self.insert(field, policy);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, policy: MergePolicy) {
        self.rules.insert(field.into(), policy);
    }

    pub fn lookup(&self, field: &str) -> MergePolicy {
        self.rules.get(field).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        DEFAULT_POLICIES.clone()
    }
}
