//! Rule requiring a kebab-case `plural` label on resources.

use aep_lint_core::utils::resource::{get_resource, has_resource, resource_location};
use aep_lint_core::{Node, NodeKind, Problem, RuleDescriptor, RuleName};

use super::label_problem;

/// Rule name for resource-plural.
pub const NAME: RuleName = RuleName::new(123, "resource-plural");

pub(crate) fn rule() -> RuleDescriptor {
    RuleDescriptor::new(NAME, NodeKind::Message, check)
        .only_if(has_resource)
        .description("Resources declare a kebab-case plural")
}

fn check(message: Node<'_>) -> Vec<Problem> {
    let Some(resource) = get_resource(message) else {
        return vec![];
    };
    label_problem(message, resource_location(message), "plural", &resource.plural)
        .into_iter()
        .collect()
}
