//! [AEP-4](https://aep.dev/4): resource types.
//!
//! Every resource declares a type of the form `{Service Name}/{Type}` and
//! one or more path patterns that alternate between collections and
//! identifiers.

mod resource_name_components_alternate;
mod resource_type_name;

use aep_lint_core::RuleDescriptor;

pub(crate) use resource_name_components_alternate::alternation_problems;
pub(crate) use resource_type_name::type_name_problem;

pub use resource_name_components_alternate::NAME as RESOURCE_NAME_COMPONENTS_ALTERNATE;
pub use resource_type_name::NAME as RESOURCE_TYPE_NAME;

/// Returns the AEP-4 rules.
#[must_use]
pub fn rules() -> Vec<RuleDescriptor> {
    vec![
        resource_type_name::rule(),
        resource_name_components_alternate::rule(),
    ]
}
