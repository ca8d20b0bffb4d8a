//! Rule requiring resources to expose their name as a singular string.

use aep_lint_core::utils::resource::{get_resource, has_resource, resource_location};
use aep_lint_core::{Node, NodeKind, Problem, RuleDescriptor, RuleName};

/// Rule name for resource-name-field.
pub const NAME: RuleName = RuleName::new(123, "resource-name-field");

pub(crate) fn rule() -> RuleDescriptor {
    RuleDescriptor::new(NAME, NodeKind::Message, check)
        .only_if(has_resource)
        .description("Resources have a singular `string` name field")
}

fn check(message: Node<'_>) -> Vec<Problem> {
    let Some(resource) = get_resource(message) else {
        return vec![];
    };
    let name_field = resource.name_field.as_str();

    let Some(field) = message.find_field(name_field) else {
        return vec![Problem::new(
            message,
            format!("Resource messages must have a `string {name_field}` field."),
        )
        .at(resource_location(message))];
    };

    match field.field_attrs() {
        Some(attrs) if attrs.type_name == "string" && !attrs.repeated => vec![],
        _ => vec![Problem::new(
            field,
            format!("Resource name field `{name_field}` must be a singular `string`."),
        )],
    }
}
