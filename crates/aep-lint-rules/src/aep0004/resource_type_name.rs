//! Rule requiring resource types of the form `{Service Name}/{Type}`.
//!
//! # Rationale
//!
//! The type is the stable identity of a resource across services. The
//! `{Type}` half must be kebab-case so that clients can derive names from it
//! without guessing word boundaries.

use aep_lint_core::utils::resource::{get_resource, has_resource, resource_location};
use aep_lint_core::utils::{split_resource_type_name, to_kebab_case};
use aep_lint_core::{Location, Node, NodeKind, Problem, RuleDescriptor, RuleName, Suggestion};

/// Rule name for resource-type-name.
pub const NAME: RuleName = RuleName::new(4, "resource-type-name");

pub(crate) fn rule() -> RuleDescriptor {
    RuleDescriptor::new(NAME, NodeKind::Message, check)
        .only_if(has_resource)
        .description("Resource type is `{Service Name}/{Type}` with a kebab-case type")
}

fn check(message: Node<'_>) -> Vec<Problem> {
    let Some(resource) = get_resource(message) else {
        return vec![];
    };
    type_name_problem(message, resource_location(message), &resource.resource_type)
        .into_iter()
        .collect()
}

/// Validates one resource type name.
pub(crate) fn type_name_problem(
    node: Node<'_>,
    location: &Location,
    resource_type: &str,
) -> Option<Problem> {
    let Some((service, type_name)) = split_resource_type_name(resource_type) else {
        return Some(
            Problem::new(
                node,
                "Resource type names must be of the form {Service Name}/{Type}.",
            )
            .at(location),
        );
    };

    let kebab = to_kebab_case(type_name);
    if kebab == type_name {
        return None;
    }

    Some(
        Problem::new(
            node,
            format!("Type must be kebab-case with alphanumeric characters: {type_name:?}"),
        )
        .at(location)
        .with_suggestion(Suggestion::new(format!("use \"{service}/{kebab}\""))),
    )
}
