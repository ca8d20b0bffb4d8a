//! Rule descriptors: a node-kind tag plus two plain functions.
//!
//! Rules are data, not trait objects. A descriptor names the node kind it
//! applies to, an activation predicate (`only_if`), and the check itself.
//! Both functions must be pure with respect to the schema tree.

use serde::{Serialize, Serializer};

use crate::schema::{Node, NodeKind};
use crate::types::{Problem, Severity};

/// Identity of a rule: the AEP proposal number plus a kebab-case short name.
///
/// Renders as `core::0123::resource-annotation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleName {
    proposal: u16,
    name: &'static str,
}

impl RuleName {
    /// Creates a new rule name.
    #[must_use]
    pub const fn new(proposal: u16, name: &'static str) -> Self {
        Self { proposal, name }
    }

    /// Returns the AEP proposal number.
    #[must_use]
    pub const fn proposal(self) -> u16 {
        self.proposal
    }

    /// Returns the short name (e.g. `resource-type-name`).
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        self.name
    }

    /// Returns the documentation URL of the proposal.
    #[must_use]
    pub fn url(self) -> String {
        format!("https://aep.dev/{}", self.proposal)
    }

    /// Checks whether a user-supplied identifier refers to this rule.
    ///
    /// Accepts the full form (`core::0004::resource-type-name`) or the
    /// short name alone.
    #[must_use]
    pub fn matches(self, query: &str) -> bool {
        query == self.name || query == self.to_string()
    }
}

impl std::fmt::Display for RuleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "core::{:04}::{}", self.proposal, self.name)
    }
}

impl Serialize for RuleName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Activation predicate of a rule.
pub type OnlyIf = fn(Node<'_>) -> bool;

/// Check function of a rule.
pub type CheckFn = fn(Node<'_>) -> Vec<Problem>;

/// A registered lint rule.
///
/// # Example
///
/// ```ignore
/// use aep_lint_core::{Node, NodeKind, Problem, RuleDescriptor, RuleName, Severity};
///
/// fn check(message: Node<'_>) -> Vec<Problem> {
///     if message.name().ends_with("Info") {
///         return vec![Problem::new(message, "Avoid the `Info` suffix.")];
///     }
///     vec![]
/// }
///
/// let rule = RuleDescriptor::new(RuleName::new(126, "no-info-suffix"), NodeKind::Message, check)
///     .severity(Severity::Should);
/// ```
#[derive(Clone, Copy)]
pub struct RuleDescriptor {
    /// Rule identity.
    pub name: RuleName,
    /// Severity tier of the findings this rule produces.
    pub severity: Severity,
    /// Node kind the rule is offered.
    pub applies_to: NodeKind,
    /// One-line description for `list-rules`.
    pub description: &'static str,
    /// Activation predicate; the check only runs when it returns true.
    pub only_if: OnlyIf,
    /// The check itself.
    pub check: CheckFn,
}

fn always(_: Node<'_>) -> bool {
    true
}

impl RuleDescriptor {
    /// Creates a `Must` rule that is always active for its node kind.
    #[must_use]
    pub fn new(name: RuleName, applies_to: NodeKind, check: CheckFn) -> Self {
        Self {
            name,
            severity: Severity::Must,
            applies_to,
            description: "",
            only_if: always,
            check,
        }
    }

    /// Sets the severity tier.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the activation predicate.
    #[must_use]
    pub fn only_if(mut self, only_if: OnlyIf) -> Self {
        self.only_if = only_if;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Returns true if the rule should run against this node.
    #[must_use]
    pub fn is_active(&self, node: Node<'_>) -> bool {
        node.kind() == self.applies_to && (self.only_if)(node)
    }

    /// Runs the check against a node.
    #[must_use]
    pub fn run(&self, node: Node<'_>) -> Vec<Problem> {
        (self.check)(node)
    }
}

impl std::fmt::Debug for RuleDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleDescriptor")
            .field("name", &self.name)
            .field("severity", &self.severity)
            .field("applies_to", &self.applies_to)
            .finish_non_exhaustive()
    }
}
