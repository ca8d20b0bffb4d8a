//! [AEP-131](https://aep.dev/131): standard Get methods.

mod request_unknown_fields;

use aep_lint_core::RuleDescriptor;

pub use request_unknown_fields::NAME as REQUEST_UNKNOWN_FIELDS;

/// Returns the AEP-131 rules.
#[must_use]
pub fn rules() -> Vec<RuleDescriptor> {
    vec![request_unknown_fields::rule()]
}
