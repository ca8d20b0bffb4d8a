//! # aep-lint-rules
//!
//! Built-in AEP naming rules for aep-lint.
//!
//! Rules are grouped by the AEP proposal that defines them. Each group
//! exposes a `rules()` function; [`registry()`] registers every group in one
//! place.
//!
//! ## Available Rules
//!
//! | Rule | Node | Description |
//! |------|------|-------------|
//! | `core::0004::resource-type-name` | message | Resource type is `{Service}/{Type}` with a kebab-case type |
//! | `core::0004::resource-name-components-alternate` | message | Patterns alternate collection and `{variable}` |
//! | `core::0123::duplicate-resource` | file | No two resources in a file share a type or pattern |
//! | `core::0123::name-never-optional` | field | Resource name fields are never `proto3_optional` |
//! | `core::0123::resource-annotation` | message | Resource-like messages, and only those, carry a well-formed annotation |
//! | `core::0123::resource-definition-pattern` | file | File-level definitions have valid patterns |
//! | `core::0123::resource-definition-type-name` | file | File-level definitions have valid type names |
//! | `core::0123::resource-definition-variables` | file | File-level definition variables drop `_id` |
//! | `core::0123::resource-name-field` | message | Resources have a singular string name field |
//! | `core::0123::resource-pattern` | message | Resources declare patterns with lowerCamel collections |
//! | `core::0123::resource-plural` | message | Resources declare a kebab-case plural |
//! | `core::0123::resource-reference-type` | field | Resource references name one well-formed type |
//! | `core::0123::resource-singular` | message | Resources declare a kebab-case singular |
//! | `core::0123::resource-variables` | message | Pattern variables drop the `_id` suffix |
//! | `core::0131::request-unknown-fields` | field | Get requests only carry documented fields |
//!
//! ## Usage
//!
//! ```ignore
//! use aep_lint_core::{Analyzer, Schema};
//!
//! let analyzer = Analyzer::builder()
//!     .registry(aep_lint_rules::registry()?)
//!     .build()?;
//! let result = analyzer.analyze(&Schema::from_file(path)?);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod aep0004;
pub mod aep0123;
pub mod aep0131;

#[cfg(test)]
mod testing;

use aep_lint_core::{RegistryError, RuleDescriptor, RuleRegistry};
use tracing::debug;

/// Re-export core types for convenience.
pub use aep_lint_core::{Finding, RuleName, Severity};

/// Builds the registry holding every built-in rule.
///
/// # Errors
///
/// Returns an error if two rules share a name or a rule is filed under the
/// wrong proposal.
pub fn registry() -> Result<RuleRegistry, RegistryError> {
    let registry = RuleRegistry::builder()
        .register(4, aep0004::rules())?
        .register(123, aep0123::rules())?
        .register(131, aep0131::rules())?
        .build();
    debug!("Registered {} built-in rule(s)", registry.len());
    Ok(registry)
}

/// Returns every built-in rule, grouped by proposal.
#[must_use]
pub fn all_rules() -> Vec<RuleDescriptor> {
    let mut rules = aep0004::rules();
    rules.extend(aep0123::rules());
    rules.extend(aep0131::rules());
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_holds_every_rule_once() {
        let registry = registry().unwrap();
        assert_eq!(registry.len(), all_rules().len());
        assert_eq!(registry.len(), 15);
    }

    #[test]
    fn rules_are_listed_in_name_order() {
        let registry = registry().unwrap();
        let names: Vec<String> = registry.iter().map(|r| r.name.to_string()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names[0], "core::0004::resource-name-components-alternate");
    }

    #[test]
    fn every_rule_is_documented() {
        for rule in all_rules() {
            assert!(!rule.description.is_empty(), "{} has no description", rule.name);
        }
    }

    #[test]
    fn short_names_resolve() {
        let registry = registry().unwrap();
        let rule = registry.get("request-unknown-fields").unwrap();
        assert_eq!(rule.name.proposal(), 131);
    }
}
