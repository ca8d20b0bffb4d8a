//! Rule restricting Get request messages to documented fields.
//!
//! # Rationale
//!
//! A Get request identifies one resource. Anything beyond the resource
//! path and the documented modifiers changes what "get" means.

use aep_lint_core::utils::is_get_request_message;
use aep_lint_core::{Node, NodeKind, Problem, RuleDescriptor, RuleName};

/// Rule name for request-unknown-fields.
pub const NAME: RuleName = RuleName::new(131, "request-unknown-fields");

/// Fields a Get request may carry.
pub const ALLOWED_FIELDS: [&str; 4] = [
    "path",       // AEP-131
    "request_id", // AEP-155
    "read_mask",  // AEP-157
    "view",       // AEP-157
];

pub(crate) fn rule() -> RuleDescriptor {
    RuleDescriptor::new(NAME, NodeKind::Field, check)
        .only_if(in_get_request)
        .description("Get requests only carry fields documented by AEP-131")
}

fn in_get_request(field: Node<'_>) -> bool {
    field.parent().is_some_and(is_get_request_message)
}

fn check(field: Node<'_>) -> Vec<Problem> {
    if ALLOWED_FIELDS.contains(&field.name()) {
        return vec![];
    }
    vec![Problem::new(
        field,
        format!(
            "Unexpected field: Get RPCs must only contain fields explicitly described in https://aep.dev/131, not {:?}.",
            field.name()
        ),
    )]
}
