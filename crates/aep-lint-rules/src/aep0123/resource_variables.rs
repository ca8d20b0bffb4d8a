//! Rule forbidding the `_id` suffix on pattern variables.
//!
//! # Rationale
//!
//! A variable already stands for an identifier; `{publisher_id}` repeats
//! it. Variables are compared through their canonical form so that
//! `{publisherId}` and `{publisher-id}` are caught as well.

use aep_lint_core::utils::pattern::canonical_variable;
use aep_lint_core::utils::resource::{get_resource, has_resource, resource_location};
use aep_lint_core::utils::{extract_variables, to_kebab_case, to_snake_case};
use aep_lint_core::{Location, Node, NodeKind, Problem, RuleDescriptor, RuleName, Suggestion};

/// Rule name for resource-variables.
pub const NAME: RuleName = RuleName::new(123, "resource-variables");

pub(crate) fn rule() -> RuleDescriptor {
    RuleDescriptor::new(NAME, NodeKind::Message, check)
        .only_if(has_resource)
        .description("Pattern variables omit the `_id` suffix")
}

fn check(message: Node<'_>) -> Vec<Problem> {
    let Some(resource) = get_resource(message) else {
        return vec![];
    };
    variable_problems(message, resource_location(message), &resource.patterns)
}

/// Reports every variable whose canonical form differs from its own.
pub(super) fn variable_problems(
    node: Node<'_>,
    location: &Location,
    patterns: &[String],
) -> Vec<Problem> {
    let mut problems = Vec::new();
    for pattern in patterns {
        for variable in extract_variables(pattern) {
            let canonical = canonical_variable(variable);
            if canonical == to_snake_case(variable) {
                continue;
            }
            problems.push(
                Problem::new(
                    node,
                    format!("Variable {variable:?} in pattern {pattern:?} must not end in `_id`."),
                )
                .at(location)
                .with_suggestion(Suggestion::new(format!(
                    "use {{{}}}",
                    to_kebab_case(&canonical)
                ))),
            );
        }
    }
    problems
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{book, conforming, conforming_with, messages, run};
    use serde_json::json;

    #[test]
    fn accepts_plain_variables() {
        assert!(run(rule(), &book(conforming())).is_empty());
        let resource = conforming_with("patterns", json!(["bookShelves/{book-shelf}", "ideas/{idea}"]));
        assert!(run(rule(), &book(resource)).is_empty());
    }

    #[test]
    fn reports_id_suffix_in_any_spelling() {
        let resource = conforming_with(
            "patterns",
            json!(["publishers/{publisher_id}/books/{bookId}", "shelves/{shelf-id}"]),
        );
        let findings = run(rule(), &book(resource));
        insta::assert_snapshot!(messages(&findings).join("\n"), @r#"
        Variable "publisher_id" in pattern "publishers/{publisher_id}/books/{bookId}" must not end in `_id`.
        Variable "bookId" in pattern "publishers/{publisher_id}/books/{bookId}" must not end in `_id`.
        Variable "shelf-id" in pattern "shelves/{shelf-id}" must not end in `_id`.
        "#);
        assert_eq!(
            findings[0].problem.suggestion.as_ref().unwrap().message,
            "use {publisher}"
        );
    }

    #[test]
    fn id_alone_is_left_to_the_grammar() {
        // `{id}` has no `_id` suffix once snake-cased.
        let resource = conforming_with("patterns", json!(["books/{id}"]));
        assert!(run(rule(), &book(resource)).is_empty());
    }
}
