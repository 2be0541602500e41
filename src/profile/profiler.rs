//! Recursive structural profiler
//!
//! Walks each record, counting every field and its value type in the
//! active scope. Structured values are routed through the [`PolicyTable`].

use super::accumulator::ScopeAccumulator;
use super::classify::TypeTag;
use super::finalize::finalize;
use super::policy::{MergePolicy, PolicyTable};
use crate::types::ProfileReport;
use serde_json::{Map, Value};

/// Accumulates field statistics over a corpus of records
#[derive(Debug)]
pub struct StructureProfiler {
    policies: PolicyTable,
    root: ScopeAccumulator,
    records: usize,
    skipped: usize,
}

impl StructureProfiler {
    pub fn new(policies: PolicyTable) -> Self {
        StructureProfiler {
            policies,
            root: ScopeAccumulator::new(),
            records: 0,
            skipped: 0,
        }
    }

    /// Profile one record into the root scope
    pub fn add_record(&mut self, record: &Map<String, Value>) {
        self.records += 1;
        profile_object(record, &mut self.root, &self.policies);
    }

    /// Note a record that was excluded from profiling
    pub fn skip_record(&mut self) {
        self.skipped += 1;
    }

    pub fn root(&self) -> &ScopeAccumulator {
        &self.root
    }

    /// Consume the accumulated counters and build the report
    pub fn finish(self) -> ProfileReport {
        ProfileReport {
            total_posts: self.records,
            post_structure: finalize(&self.root, self.records),
            skipped_records: self.skipped,
        }
    }
}

impl Default for StructureProfiler {
    fn default() -> Self {
        Self::new(PolicyTable::default())
    }
}

/// Profile every field of `object` into `scope`
pub fn profile_object(
    object: &Map<String, Value>,
    scope: &mut ScopeAccumulator,
    policies: &PolicyTable,
) {
    for (key, value) in object {
        scope.field_mut(key).observe(TypeTag::of(value));

        match value {
            Value::Object(inner) => match policies.lookup(key) {
                MergePolicy::MergeIntoParent => profile_object(inner, scope, policies),
                MergePolicy::AnonymousCollection => {
                    let children = scope.field_mut(key).children_mut();
                    for item in inner.values() {
                        if let Value::Object(item) = item {
                            profile_object(item, children, policies);
                        }
                    }
                }
                MergePolicy::Default => {
                    profile_object(inner, scope.field_mut(key).children_mut(), policies);
                }
            },
            Value::Array(items) if matches!(items.first(), Some(Value::Object(_))) => {
                let children = scope.field_mut(key).children_mut();
                for item in items {
                    if let Value::Object(item) = item {
                        profile_object(item, children, policies);
                    }
                }
            }
            _ => {}
        }
    }
}
