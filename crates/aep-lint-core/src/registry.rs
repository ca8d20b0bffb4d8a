//! Rule registry: built once at startup, read-only afterwards.
//!
//! ```ignore
//! let registry = RuleRegistry::builder()
//!     .register(4, aep0004::rules())?
//!     .register(123, aep0123::rules())?
//!     .build();
//! ```

use std::collections::BTreeMap;

use miette::Diagnostic;
use thiserror::Error;
use tracing::debug;

use crate::rule::{RuleDescriptor, RuleName};
use crate::schema::NodeKind;
use crate::utils::case::to_kebab_case;

/// Setup errors raised while registering rules.
///
/// These are fatal: no lint pass runs on a registry that failed to build.
#[derive(Debug, Error, Diagnostic)]
pub enum RegistryError {
    /// Two rules share the same identity.
    #[error("rule `{name}` is registered more than once")]
    #[diagnostic(
        code(aep_lint::registry::duplicate_rule),
        help("each (proposal, short name) pair must be unique across all rule groups")
    )]
    DuplicateRule {
        /// The duplicated rule identity.
        name: String,
    },

    /// A rule was registered under a proposal group it does not belong to.
    #[error("rule `{name}` cannot be registered under AEP-{proposal}")]
    #[diagnostic(
        code(aep_lint::registry::proposal_mismatch),
        help("register the rule with the group matching its proposal number")
    )]
    ProposalMismatch {
        /// The misplaced rule identity.
        name: String,
        /// The proposal group it was registered under.
        proposal: u16,
    },

    /// A rule short name is not kebab case.
    #[error("rule name `{name}` must be kebab-case")]
    #[diagnostic(code(aep_lint::registry::invalid_rule_name))]
    InvalidRuleName {
        /// The offending rule identity.
        name: String,
    },
}

/// Builder collecting rule groups before the registry is frozen.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    rules: BTreeMap<RuleName, RuleDescriptor>,
}

impl RegistryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a group of rules belonging to one AEP proposal.
    ///
    /// # Errors
    ///
    /// Returns an error if a rule's identity is already registered, if it
    /// belongs to a different proposal, or if its short name is malformed.
    pub fn register<I>(mut self, proposal: u16, rules: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = RuleDescriptor>,
    {
        for rule in rules {
            let name = rule.name;
            if name.proposal() != proposal {
                return Err(RegistryError::ProposalMismatch {
                    name: name.to_string(),
                    proposal,
                });
            }
            let short = name.short_name();
            if short.is_empty() || to_kebab_case(short) != short {
                return Err(RegistryError::InvalidRuleName {
                    name: name.to_string(),
                });
            }
            if self.rules.insert(name, rule).is_some() {
                return Err(RegistryError::DuplicateRule {
                    name: name.to_string(),
                });
            }
            debug!("Registered rule {}", name);
        }
        Ok(self)
    }

    /// Freezes the registry.
    #[must_use]
    pub fn build(self) -> RuleRegistry {
        RuleRegistry {
            rules: self.rules.into_values().collect(),
        }
    }
}

/// An immutable set of rules, ordered by rule identity.
#[derive(Debug, Default, Clone)]
pub struct RuleRegistry {
    rules: Vec<RuleDescriptor>,
}

impl RuleRegistry {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates over all rules in identity order.
    pub fn iter(&self) -> impl Iterator<Item = &RuleDescriptor> {
        self.rules.iter()
    }

    /// Iterates over the rules offered nodes of the given kind.
    pub fn rules_for(&self, kind: NodeKind) -> impl Iterator<Item = &RuleDescriptor> {
        self.rules.iter().filter(move |r| r.applies_to == kind)
    }

    /// Looks up a rule by full or short name.
    #[must_use]
    pub fn get(&self, query: &str) -> Option<&RuleDescriptor> {
        self.rules.iter().find(|r| r.name.matches(query))
    }

    /// Returns a registry restricted to the rules the predicate keeps.
    #[must_use]
    pub fn filtered(&self, mut keep: impl FnMut(&RuleDescriptor) -> bool) -> Self {
        Self {
            rules: self.rules.iter().filter(|r| keep(r)).copied().collect(),
        }
    }
}
