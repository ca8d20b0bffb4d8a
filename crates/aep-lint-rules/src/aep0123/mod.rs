//! [AEP-123](https://aep.dev/123): resource types.
//!
//! Resource messages carry an `aep.api.resource` annotation. Resources
//! without a backing message are declared on the file under
//! `aep.api.resource_definition` and get the same checks. Fields that point
//! at a resource carry `aep.api.field_info.resource_reference`.

mod duplicate_resource;
mod name_never_optional;
mod resource_annotation;
mod resource_definition;
mod resource_name_field;
mod resource_pattern;
mod resource_plural;
mod resource_reference_type;
mod resource_singular;
mod resource_variables;

use aep_lint_core::utils::to_kebab_case;
use aep_lint_core::{Location, Node, Problem, RuleDescriptor, Suggestion};

pub use duplicate_resource::NAME as DUPLICATE_RESOURCE;
pub use name_never_optional::NAME as NAME_NEVER_OPTIONAL;
pub use resource_annotation::NAME as RESOURCE_ANNOTATION;
pub use resource_definition::{
    PATTERN as RESOURCE_DEFINITION_PATTERN, TYPE_NAME as RESOURCE_DEFINITION_TYPE_NAME,
    VARIABLES as RESOURCE_DEFINITION_VARIABLES,
};
pub use resource_name_field::NAME as RESOURCE_NAME_FIELD;
pub use resource_pattern::NAME as RESOURCE_PATTERN;
pub use resource_plural::NAME as RESOURCE_PLURAL;
pub use resource_reference_type::NAME as RESOURCE_REFERENCE_TYPE;
pub use resource_singular::NAME as RESOURCE_SINGULAR;
pub use resource_variables::NAME as RESOURCE_VARIABLES;

/// Returns the AEP-123 rules.
#[must_use]
pub fn rules() -> Vec<RuleDescriptor> {
    vec![
        duplicate_resource::rule(),
        name_never_optional::rule(),
        resource_annotation::rule(),
        resource_definition::type_name_rule(),
        resource_definition::pattern_rule(),
        resource_definition::variables_rule(),
        resource_name_field::rule(),
        resource_pattern::rule(),
        resource_plural::rule(),
        resource_reference_type::rule(),
        resource_singular::rule(),
        resource_variables::rule(),
    ]
}

/// Checks a singular or plural label: present, and kebab-case.
fn label_problem(node: Node<'_>, location: &Location, field: &str, label: &str) -> Option<Problem> {
    if label.is_empty() {
        return Some(
            Problem::new(node, format!("Resources must declare `{field}`.")).at(location),
        );
    }
    let kebab = to_kebab_case(label);
    if kebab == label {
        return None;
    }
    Some(
        Problem::new(node, format!("Resource {field} must be kebab-case: {label:?}"))
            .at(location)
            .with_suggestion(Suggestion::new(format!("use {kebab:?}"))),
    )
}
