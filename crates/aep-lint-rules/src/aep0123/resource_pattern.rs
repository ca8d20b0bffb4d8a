//! Rule requiring resources to declare well-formed patterns.
//!
//! # Rationale
//!
//! Collection segments appear verbatim in resource names. They follow the
//! lowerCamelCase convention so that names can be mapped back to fields.
//! Variable naming is checked separately by `resource-variables`.

use aep_lint_core::utils::resource::{get_resource, has_resource, resource_location};
use aep_lint_core::utils::{desired_form, plain_form};
use aep_lint_core::{Location, Node, NodeKind, Problem, RuleDescriptor, RuleName, Suggestion};

/// Rule name for resource-pattern.
pub const NAME: RuleName = RuleName::new(123, "resource-pattern");

pub(crate) fn rule() -> RuleDescriptor {
    RuleDescriptor::new(NAME, NodeKind::Message, check)
        .only_if(has_resource)
        .description("Resources declare patterns with lowerCamelCase collections")
}

fn check(message: Node<'_>) -> Vec<Problem> {
    let Some(resource) = get_resource(message) else {
        return vec![];
    };
    pattern_problems(message, resource_location(message), &resource.patterns)
}

/// Checks that patterns exist and their collections are in desired form.
pub(super) fn pattern_problems(
    node: Node<'_>,
    location: &Location,
    patterns: &[String],
) -> Vec<Problem> {
    if patterns.is_empty() {
        return vec![Problem::new(node, "Resources must declare resource name pattern(s).").at(location)];
    }

    patterns
        .iter()
        .filter_map(|pattern| {
            let desired = desired_form(pattern);
            if plain_form(&desired) == plain_form(pattern) {
                return None;
            }
            Some(
                Problem::new(
                    node,
                    format!("Resource pattern {pattern:?} must use lowerCamelCase collection segments."),
                )
                .at(location)
                .with_suggestion(Suggestion::new(format!("use {desired:?}"))),
            )
        })
        .collect()
}
