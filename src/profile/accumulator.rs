//! Mutable counters for one profiling run
//!
//! A [`ScopeAccumulator`] holds one nesting level. Entries and child scopes
//! are created on first use through explicit get-or-create accessors.

use super::classify::TypeTag;
use std::collections::HashMap;

/// Counters for a single field within a scope
#[derive(Debug, Default)]
pub struct FieldAccumulator {
    count: usize,
    type_counts: HashMap<TypeTag, usize>,
    children: Option<ScopeAccumulator>,
}

impl FieldAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of this field carrying a value of type `tag`
    pub fn observe(&mut self, tag: TypeTag) {
        self.count += 1;
        *self.type_counts.entry(tag).or_insert(0) += 1;
    }

    /// Child scope for this field, created if missing
    pub fn children_mut(&mut self) -> &mut ScopeAccumulator {
        self.children.get_or_insert_with(ScopeAccumulator::new)
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn type_counts(&self) -> &HashMap<TypeTag, usize> {
        &self.type_counts
    }

    pub fn children(&self) -> Option<&ScopeAccumulator> {
        self.children.as_ref()
    }
}

/// One level of the accumulator tree: field name to counters
#[derive(Debug, Default)]
pub struct ScopeAccumulator {
    fields: HashMap<String, FieldAccumulator>,
}

impl ScopeAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters for `name`, created if missing
    pub fn field_mut(&mut self, name: &str) -> &mut FieldAccumulator {
        self.fields
            .entry(name.to_string())
            .or_insert_with(FieldAccumulator::new)
    }

    pub fn field(&self, name: &str) -> Option<&FieldAccumulator> {
        self.fields.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldAccumulator)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
