//! Rules for file-level resource definitions.
//!
//! Definitions declare resources that have no backing message. They get the
//! type-name, pattern, and variable checks that annotated messages get.

use aep_lint_core::utils::resource::{
    get_resource_definitions, has_resource_definitions, resource_definition_location,
};
use aep_lint_core::{Node, NodeKind, Problem, RuleDescriptor, RuleName};

use super::resource_pattern::pattern_problems;
use super::resource_variables::variable_problems;
use crate::aep0004::{alternation_problems, type_name_problem};

/// Rule name for resource-definition-type-name.
pub const TYPE_NAME: RuleName = RuleName::new(123, "resource-definition-type-name");

/// Rule name for resource-definition-pattern.
pub const PATTERN: RuleName = RuleName::new(123, "resource-definition-pattern");

/// Rule name for resource-definition-variables.
pub const VARIABLES: RuleName = RuleName::new(123, "resource-definition-variables");

pub(crate) fn type_name_rule() -> RuleDescriptor {
    RuleDescriptor::new(TYPE_NAME, NodeKind::File, check_type_names)
        .only_if(has_resource_definitions)
        .description("Resource definitions have `{Service Name}/{Type}` type names")
}

pub(crate) fn pattern_rule() -> RuleDescriptor {
    RuleDescriptor::new(PATTERN, NodeKind::File, check_patterns)
        .only_if(has_resource_definitions)
        .description("Resource definitions declare alternating lowerCamelCase patterns")
}

pub(crate) fn variables_rule() -> RuleDescriptor {
    RuleDescriptor::new(VARIABLES, NodeKind::File, check_variables)
        .only_if(has_resource_definitions)
        .description("Resource definition variables omit the `_id` suffix")
}

fn check_type_names(file: Node<'_>) -> Vec<Problem> {
    let location = resource_definition_location(file);
    get_resource_definitions(file)
        .iter()
        .filter_map(|def| type_name_problem(file, location, &def.resource_type))
        .collect()
}

fn check_patterns(file: Node<'_>) -> Vec<Problem> {
    let location = resource_definition_location(file);
    get_resource_definitions(file)
        .iter()
        .flat_map(|def| {
            let mut problems = pattern_problems(file, location, &def.patterns);
            problems.extend(alternation_problems(file, location, &def.patterns));
            problems
        })
        .collect()
}

fn check_variables(file: Node<'_>) -> Vec<Problem> {
    let location = resource_definition_location(file);
    get_resource_definitions(file)
        .iter()
        .flat_map(|def| variable_problems(file, location, &def.patterns))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{messages, run};
    use serde_json::{json, Value};

    fn definitions(defs: Value) -> Value {
        json!({"files": [{
            "name": "library.proto",
            "annotations": {"aep.api.resource_definition": {
                "value": defs,
                "location": {"line": 3, "column": 1}
            }}
        }]})
    }

    #[test]
    fn accepts_conforming_definitions() {
        let schema = definitions(json!([
            {"type": "library.example.com/shelf", "patterns": ["shelves/{shelf}"]},
            {"type": "library.example.com/book-shelf", "patterns": ["bookShelves/{book-shelf}"]}
        ]));
        for rule in [type_name_rule(), pattern_rule(), variables_rule()] {
            assert!(run(rule, &schema).is_empty(), "{}", rule.name);
        }
    }

    #[test]
    fn single_definition_object_is_checked() {
        let schema = definitions(json!({"type": "Shelf", "patterns": ["shelves/{shelf}"]}));
        let findings = run(type_name_rule(), &schema);
        assert_eq!(
            messages(&findings),
            vec!["Resource type names must be of the form {Service Name}/{Type}."]
        );
        assert_eq!(findings[0].location().line, 3);
    }

    #[test]
    fn reports_pattern_problems() {
        let schema = definitions(json!([
            {"type": "library.example.com/shelf", "patterns": []},
            {"type": "library.example.com/book", "patterns": ["Books/{book}", "books"]}
        ]));
        let findings = run(pattern_rule(), &schema);
        insta::assert_snapshot!(messages(&findings).join("\n"), @r#"
        Resources must declare resource name pattern(s).
        Resource pattern "Books/{book}" must use lowerCamelCase collection segments.
        Resource pattern "books" must alternate between collection and identifier. "books" must be followed by an identifier
        "#);
    }

    #[test]
    fn reports_id_suffixed_variables() {
        let schema = definitions(json!([
            {"type": "library.example.com/shelf", "patterns": ["shelves/{shelf_id}"]}
        ]));
        let findings = run(variables_rule(), &schema);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, VARIABLES);
    }

    #[test]
    fn files_without_definitions_are_skipped() {
        let schema = json!({"files": [{"name": "empty.proto"}]});
        assert!(run(type_name_rule(), &schema).is_empty());
    }
}
