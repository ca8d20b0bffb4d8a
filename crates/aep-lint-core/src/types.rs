//! Core types for lint problems and results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::rule::RuleName;
use crate::schema::{Node, NodeId};

/// Severity tier of a rule, as used by the AEP style guide.
///
/// Ordered from weakest to strongest so threshold checks can use `>=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Optional guidance.
    May,
    /// Strong recommendation; exceptions need a reason.
    Should,
    /// Hard requirement; blocks acceptance.
    Must,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::May => write!(f, "may"),
            Self::Should => write!(f, "should"),
            Self::Must => write!(f, "must"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "may" => Ok(Self::May),
            "should" => Ok(Self::Should),
            "must" => Ok(Self::Must),
            other => Err(format!("unknown severity `{other}`, expected: must, should, may")),
        }
    }
}

/// Source position supplied by the schema compiler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Schema file the node was declared in.
    pub file: PathBuf,
    /// Line number (1-indexed, 0 when unknown).
    pub line: usize,
    /// Column number (1-indexed, 0 when unknown).
    pub column: usize,
}

impl Location {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

/// A suggested fix for a problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Human-readable description of the fix.
    pub message: String,
}

impl Suggestion {
    /// Creates a new suggestion.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A finding reported by a single rule check against a single node.
///
/// Checks only describe what is wrong and where; the dispatcher stamps the
/// rule identity and severity when it turns the problem into a [`Finding`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    /// Human-readable message.
    pub message: String,
    /// The offending node. Ids are only meaningful within one schema, so
    /// they stay out of serialized output.
    #[serde(skip)]
    pub node: NodeId,
    /// Where the problem should be reported.
    pub location: Location,
    /// Optional suggestion for fixing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
}

impl Problem {
    /// Creates a problem located at the node itself.
    #[must_use]
    pub fn new(node: Node<'_>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            node: node.id(),
            location: node.location().clone(),
            suggestion: None,
        }
    }

    /// Moves the problem to a more precise location (e.g. an annotation).
    #[must_use]
    pub fn at(mut self, location: &Location) -> Self {
        self.location = location.clone();
        self
    }

    /// Adds a suggestion to this problem.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestion = Some(suggestion);
        self
    }
}

/// A problem attributed to the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Rule identity (e.g. `core::0004::resource-type-name`).
    pub rule: RuleName,
    /// Severity tier of the rule (after config overrides).
    pub severity: Severity,
    /// What the rule reported.
    #[serde(flatten)]
    pub problem: Problem,
}

impl Finding {
    /// Creates a new finding.
    #[must_use]
    pub fn new(rule: RuleName, severity: Severity, problem: Problem) -> Self {
        Self {
            rule,
            severity,
            problem,
        }
    }

    /// Returns the message of the underlying problem.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.problem.message
    }

    /// Returns the location of the underlying problem.
    #[must_use]
    pub fn location(&self) -> &Location {
        &self.problem.location
    }

    /// Formats the finding for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let location = self.location();
        let mut output = format!(
            "{} at {}:{}:{}\n",
            self.rule,
            location.file.display(),
            location.line,
            location.column,
        );
        let _ = writeln!(output, "  {}: {}", self.severity, self.message());
        if let Some(suggestion) = &self.problem.suggestion {
            let _ = writeln!(output, "  = help: {}", suggestion.message);
        }
        let _ = writeln!(output, "  = see: {}", self.rule.url());
        output
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let location = self.location();
        write!(
            f,
            "{}:{}:{}: {} [{}] {}",
            location.file.display(),
            location.line,
            location.column,
            self.severity,
            self.rule,
            self.message()
        )
    }
}

/// Result of a lint pass.
#[derive(Debug, Default, Serialize)]
pub struct LintResult {
    /// All findings, in traversal order.
    pub findings: Vec<Finding>,
    /// Number of schema files checked.
    pub files_checked: usize,
    /// Number of nodes offered to the rules.
    pub nodes_visited: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are no findings at all.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Returns findings filtered by severity.
    #[must_use]
    pub fn by_severity(&self, severity: Severity) -> Vec<&Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .collect()
    }

    /// Returns findings reported by one rule.
    #[must_use]
    pub fn by_rule(&self, rule: &str) -> Vec<&Finding> {
        self.findings
            .iter()
            .filter(|f| f.rule.matches(rule))
            .collect()
    }

    /// Counts findings by severity as `(must, should, may)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let count = |severity: Severity| {
            self.findings
                .iter()
                .filter(|f| f.severity == severity)
                .count()
        };
        (
            count(Severity::Must),
            count(Severity::Should),
            count(Severity::May),
        )
    }

    /// Checks if any findings meet or exceed the given severity threshold.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.findings.iter().any(|f| f.severity >= severity)
    }

    /// Appends the findings of another pass.
    pub fn extend(&mut self, other: Self) {
        self.findings.extend(other.findings);
        self.files_checked += other.files_checked;
        self.nodes_visited += other.nodes_visited;
    }
}
