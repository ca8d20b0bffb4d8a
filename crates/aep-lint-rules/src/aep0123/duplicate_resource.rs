//! Rule forbidding two resources in one file from sharing a type or pattern.
//!
//! # Rationale
//!
//! Resource types and patterns must resolve to exactly one resource.
//! Patterns are compared in plain form, so `books/{book}` and `books/{id}`
//! collide.

use std::collections::HashMap;

use aep_lint_core::utils::plain_form;
use aep_lint_core::utils::resource::{
    get_resource, get_resource_definitions, resource_definition_location, resource_location,
    ResourceAnnotation,
};
use aep_lint_core::{Location, Node, NodeKind, Problem, RuleDescriptor, RuleName};

/// Rule name for duplicate-resource.
pub const NAME: RuleName = RuleName::new(123, "duplicate-resource");

pub(crate) fn rule() -> RuleDescriptor {
    RuleDescriptor::new(NAME, NodeKind::File, check)
        .description("No two resources in a file share a type or a pattern")
}

/// One resource declaration, wherever it was written.
struct Declaration<'a> {
    node: Node<'a>,
    location: &'a Location,
    label: String,
    resource: ResourceAnnotation,
}

fn declarations(file: Node<'_>) -> Vec<Declaration<'_>> {
    let mut out: Vec<Declaration<'_>> = file
        .walk()
        .filter(|n| n.kind() == NodeKind::Message)
        .filter_map(|message| {
            get_resource(message).map(|resource| Declaration {
                node: message,
                location: resource_location(message),
                label: format!("message {}", message.full_name()),
                resource,
            })
        })
        .collect();

    let location = resource_definition_location(file);
    out.extend(
        get_resource_definitions(file)
            .into_iter()
            .enumerate()
            .map(|(i, resource)| Declaration {
                node: file,
                location,
                label: format!("resource definition #{}", i + 1),
                resource,
            }),
    );
    out
}

fn check(file: Node<'_>) -> Vec<Problem> {
    let declarations = declarations(file);
    let mut types: HashMap<&str, &str> = HashMap::new();
    let mut patterns: HashMap<String, (&str, &str)> = HashMap::new();
    let mut problems = Vec::new();

    for decl in &declarations {
        let resource_type = decl.resource.resource_type.as_str();
        if !resource_type.is_empty() {
            if let Some(first) = types.get(resource_type) {
                problems.push(
                    Problem::new(
                        decl.node,
                        format!("Resource type {resource_type:?} is already declared by {first}."),
                    )
                    .at(decl.location),
                );
            } else {
                types.insert(resource_type, decl.label.as_str());
            }
        }

        for pattern in &decl.resource.patterns {
            let plain = plain_form(pattern);
            if let Some((first_pattern, first)) = patterns.get(&plain) {
                problems.push(
                    Problem::new(
                        decl.node,
                        format!(
                            "Resource pattern {pattern:?} collides with {first_pattern:?} of {first}."
                        ),
                    )
                    .at(decl.location),
                );
            } else {
                patterns.insert(plain, (pattern.as_str(), decl.label.as_str()));
            }
        }
    }

    problems
}
