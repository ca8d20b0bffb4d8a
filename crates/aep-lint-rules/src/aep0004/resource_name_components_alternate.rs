//! Rule requiring resource patterns to alternate collections and identifiers.
//!
//! # Rationale
//!
//! `publishers/{publisher}/books/{book}` can be read as a path of
//! collection/identifier pairs. Patterns that skip an identifier or repeat a
//! collection cannot.

use aep_lint_core::utils::parse_segments;
use aep_lint_core::utils::resource::{get_resource, has_resource, resource_location};
use aep_lint_core::{Location, Node, NodeKind, Problem, RuleDescriptor, RuleName};

/// Rule name for resource-name-components-alternate.
pub const NAME: RuleName = RuleName::new(4, "resource-name-components-alternate");

pub(crate) fn rule() -> RuleDescriptor {
    RuleDescriptor::new(NAME, NodeKind::Message, check)
        .only_if(has_resource)
        .description("Resource patterns alternate between collections and `{variable}` identifiers")
}

fn check(message: Node<'_>) -> Vec<Problem> {
    let Some(resource) = get_resource(message) else {
        return vec![];
    };
    alternation_problems(message, resource_location(message), &resource.patterns)
}

/// Reports the first alternation break of every pattern.
pub(crate) fn alternation_problems(
    node: Node<'_>,
    location: &Location,
    patterns: &[String],
) -> Vec<Problem> {
    patterns
        .iter()
        .filter_map(|pattern| {
            let err = parse_segments(pattern).err()?;
            Some(
                Problem::new(
                    node,
                    format!(
                        "Resource pattern {pattern:?} must alternate between collection and identifier. {err}"
                    ),
                )
                .at(location),
            )
        })
        .collect()
}
