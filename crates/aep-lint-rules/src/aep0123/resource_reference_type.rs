//! Rule requiring resource references to name a well-formed resource type.
//!
//! # Rationale
//!
//! A reference is resolved by type. A type that does not match
//! `{Service Name}/{Type}` can never resolve to a declared resource.

use aep_lint_core::utils::resource::{
    has_resource_reference, parse_resource_reference, resource_reference_location,
};
use aep_lint_core::{Node, NodeKind, Problem, RuleDescriptor, RuleName};

use crate::aep0004::type_name_problem;

/// Rule name for resource-reference-type.
pub const NAME: RuleName = RuleName::new(123, "resource-reference-type");

pub(crate) fn rule() -> RuleDescriptor {
    RuleDescriptor::new(NAME, NodeKind::Field, check)
        .only_if(has_resource_reference)
        .description("Resource references name exactly one well-formed resource type")
}

fn check(field: Node<'_>) -> Vec<Problem> {
    let location = resource_reference_location(field);
    let reference = match parse_resource_reference(field) {
        Some(Ok(reference)) => reference,
        Some(Err(e)) => {
            return vec![Problem::new(field, format!("Resource reference is malformed: {e}")).at(location)]
        }
        None => return vec![],
    };

    match (reference.resource_type.as_str(), reference.child_type.as_str()) {
        ("", "") => vec![Problem::new(
            field,
            "Resource references must set `type` or `child_type`.",
        )
        .at(location)],
        (resource_type, "") | ("", resource_type) => {
            type_name_problem(field, location, resource_type).into_iter().collect()
        }
        (_, _) => vec![Problem::new(
            field,
            "Resource references must set only one of `type` and `child_type`.",
        )
        .at(location)],
    }
}
