//! Conversion of the accumulator tree into a report

use super::accumulator::ScopeAccumulator;
use crate::types::{SchemaNode, Structure};

/// Format `count / total` as a percentage with two decimals.
///
/// A zero `total` yields `"0.00%"`.
pub fn format_percent(count: usize, total: usize) -> String {
    if total == 0 {
        return String::from("0.00%");
    }
    format!("{:.2}%", count as f64 / total as f64 * 100.0)
}

/// Build the report nodes for `scope`, using `parent_total` as the frequency denominator.
///
/// Child scopes are finalized against the owning field's own count.
pub fn finalize(scope: &ScopeAccumulator, parent_total: usize) -> Structure {
    let mut structure = Structure::new();

    for (name, field) in scope.iter() {
        let types = field
            .type_counts()
            .iter()
            .map(|(tag, count)| (tag.to_string(), *count))
            .collect();

        let children = field
            .children()
            .filter(|children| !children.is_empty())
            .map(|children| finalize(children, field.count()));

        structure.insert(
            name.clone(),
            SchemaNode {
                count: field.count(),
                frequency: format_percent(field.count(), parent_total),
                types,
                children,
            },
        );
    }

    structure
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::classify::TypeTag;

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(1, 2), "50.00%");
        assert_eq!(format_percent(2, 2), "100.00%");
        assert_eq!(format_percent(1, 3), "33.33%");
        assert_eq!(format_percent(2, 3), "66.67%");
        assert_eq!(format_percent(0, 5), "0.00%");
    }

    #[test]
    fn test_format_percent_zero_total() {
        assert_eq!(format_percent(0, 0), "0.00%");
        assert_eq!(format_percent(3, 0), "0.00%");
    }

    #[test]
    fn test_children_use_field_count_as_total() {
        let mut scope = ScopeAccumulator::new();
        let user = scope.field_mut("user");
        user.observe(TypeTag::Object);
        user.observe(TypeTag::Object);
        user.children_mut().field_mut("id").observe(TypeTag::Number);

        let structure = finalize(&scope, 4);
        let user = &structure["user"];
        assert_eq!(user.frequency, "50.00%");

        let id = &user.children.as_ref().unwrap()["id"];
        assert_eq!(id.count, 1);
        assert_eq!(id.frequency, "50.00%");
        assert_eq!(id.types.get("number"), Some(&1));
    }

    #[test]
    fn test_empty_children_are_omitted() {
        let mut scope = ScopeAccumulator::new();
        let pics = scope.field_mut("pic_infos");
        pics.observe(TypeTag::Object);
        pics.children_mut();

        let structure = finalize(&scope, 1);
        assert!(structure["pic_infos"].children.is_none());
    }
}
