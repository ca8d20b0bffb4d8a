//! Rule requiring resource-like messages to be annotated, and only those.
//!
//! # Rationale
//!
//! A top-level message with a `name` field is almost always a resource.
//! Without the annotation, tooling cannot derive its type or patterns.
//! Nested messages and request or response payloads are never resources,
//! so an annotation on them is a mistake.

use aep_lint_core::utils::is_resource_candidate;
use aep_lint_core::utils::resource::{parse_resource, resource_location, RESOURCE_KEY};
use aep_lint_core::{Node, NodeKind, Problem, RuleDescriptor, RuleName, Severity, Suggestion};

/// Rule name for resource-annotation.
pub const NAME: RuleName = RuleName::new(123, "resource-annotation");

pub(crate) fn rule() -> RuleDescriptor {
    RuleDescriptor::new(NAME, NodeKind::Message, check)
        .severity(Severity::Should)
        .only_if(is_candidate_or_annotated)
        .description("Resource-like messages carry a well-formed resource annotation")
}

fn is_candidate_or_annotated(message: Node<'_>) -> bool {
    is_resource_candidate(message) || message.annotation(RESOURCE_KEY).is_some()
}

/// Why an annotated message cannot be a resource, if it cannot.
fn misplacement(message: Node<'_>) -> Option<String> {
    let name = message.name();
    if message.parent().is_some_and(|p| p.kind() == NodeKind::Message) {
        return Some(format!("Nested message {name:?} must not carry a resource annotation."));
    }
    ["Request", "Response"]
        .into_iter()
        .find(|suffix| name.ends_with(*suffix))
        .map(|suffix| {
            format!("Message {name:?} ends in `{suffix}` and must not carry a resource annotation.")
        })
}

fn check(message: Node<'_>) -> Vec<Problem> {
    if message.annotation(RESOURCE_KEY).is_some() {
        if let Some(reason) = misplacement(message) {
            return vec![Problem::new(message, reason)
                .at(resource_location(message))
                .with_suggestion(Suggestion::new(
                    "move the annotation to a top-level resource message",
                ))];
        }
    }
    match parse_resource(message) {
        None => vec![Problem::new(
            message,
            format!("Message {:?} looks like a resource but has no resource annotation.", message.name()),
        )
        .with_suggestion(Suggestion::new(format!(
            "add an `{RESOURCE_KEY}` annotation with `type` and `patterns`"
        )))],
        Some(Err(e)) => vec![Problem::new(
            message,
            format!("Resource annotation is malformed: {e}"),
        )
        .at(resource_location(message))],
        Some(Ok(_)) => vec![],
    }
}
