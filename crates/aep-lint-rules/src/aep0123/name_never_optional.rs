//! Rule forbidding `proto3_optional` on resource name fields.
//!
//! # Rationale
//!
//! Every resource has a name; marking the field optional suggests
//! otherwise and changes the generated accessors.

use aep_lint_core::utils::resource::get_resource;
use aep_lint_core::{Node, NodeKind, Problem, RuleDescriptor, RuleName, Suggestion};

/// Rule name for name-never-optional.
pub const NAME: RuleName = RuleName::new(123, "name-never-optional");

pub(crate) fn rule() -> RuleDescriptor {
    RuleDescriptor::new(NAME, NodeKind::Field, check)
        .only_if(is_resource_name_field)
        .description("Resource name fields are never `proto3_optional`")
}

fn is_resource_name_field(field: Node<'_>) -> bool {
    field
        .parent()
        .and_then(get_resource)
        .is_some_and(|resource| resource.name_field == field.name())
}

fn check(field: Node<'_>) -> Vec<Problem> {
    match field.field_attrs() {
        Some(attrs) if attrs.proto3_optional => vec![Problem::new(
            field,
            format!("Resource name field {:?} must never be labeled `optional`.", field.name()),
        )
        .with_suggestion(Suggestion::new("remove the `optional` label"))],
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{book, conforming, file, run};
    use serde_json::json;

    fn resource_with_name(field: serde_json::Value) -> serde_json::Value {
        file(json!([{
            "name": "Book",
            "fields": [field, {"name": "title", "type": "string", "proto3_optional": true}],
            "annotations": {"aep.api.resource": {"type": "library.example.com/book", "patterns": ["books/{book}"]}}
        }]))
    }

    #[test]
    fn accepts_required_name() {
        assert!(run(rule(), &book(conforming())).is_empty());
    }

    #[test]
    fn reports_optional_name() {
        let schema = resource_with_name(json!({"name": "name", "type": "string", "proto3_optional": true}));
        let findings = run(rule(), &schema);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].message(),
            "Resource name field \"name\" must never be labeled `optional`."
        );
    }

    #[test]
    fn ignores_other_optional_fields_and_plain_messages() {
        let schema = file(json!([{
            "name": "Draft",
            "fields": [{"name": "name", "type": "string", "proto3_optional": true}]
        }]));
        assert!(run(rule(), &schema).is_empty());
    }
}
