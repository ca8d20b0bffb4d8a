//! Resource path pattern grammar.
//!
//! A pattern is a `/`-delimited sequence alternating literal collection
//! segments and `{variable}` segments, starting with a collection and ending
//! with a variable: `publishers/{publisher}/books/{book}`.

use std::fmt;
use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use super::case::{to_lower_camel_case, to_snake_case};

#[allow(clippy::expect_used)] // literal pattern
static VARIABLE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\{[a-z][-a-z0-9]*[a-z0-9]\}$").expect("valid regex"));

#[allow(clippy::expect_used)] // literal pattern
static VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^}=]+)\}").expect("valid regex"));

/// Marker substituted for variables in [`plain_form`].
pub const WILDCARD: &str = "*";

/// One parsed segment of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A literal collection token (`publishers`).
    Collection(&'a str),
    /// A variable, holding the name inside the braces (`publisher`).
    Variable(&'a str),
}

/// Which kind of segment a position requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Even positions.
    Collection,
    /// Odd positions.
    Variable,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collection => write!(f, "collection"),
            Self::Variable => write!(f, "identifier"),
        }
    }
}

/// The first place a pattern breaks collection/variable alternation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternationError {
    /// 0-based position where `expected` was required.
    pub index: usize,
    /// The offending token (for a missing trailing variable, the last
    /// collection segment).
    pub segment: String,
    /// What the position required.
    pub expected: SegmentKind,
    /// True if the pattern ended where a variable was required.
    pub missing: bool,
}

impl fmt::Display for AlternationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let article = match self.expected {
            SegmentKind::Collection => "a",
            SegmentKind::Variable => "an",
        };
        if self.missing {
            write!(f, "{:?} must be followed by {article} {}", self.segment, self.expected)
        } else {
            write!(f, "{:?} is not {article} {}", self.segment, self.expected)
        }
    }
}

/// Returns true if the token is a valid `{variable}`.
#[must_use]
pub fn is_variable_token(token: &str) -> bool {
    VARIABLE_TOKEN.is_match(token)
}

fn is_braced(token: &str) -> bool {
    token.len() >= 2 && token.starts_with('{') && token.ends_with('}')
}

/// Parses a pattern into segments, validating alternation.
///
/// Stops at the first violation.
///
/// # Errors
///
/// Returns the first segment that breaks alternation, or the trailing
/// collection when the pattern does not end with a variable.
pub fn parse_segments(pattern: &str) -> Result<Vec<Segment<'_>>, AlternationError> {
    let mut segments = Vec::new();

    for (index, token) in pattern.split('/').enumerate() {
        let expected = if index % 2 == 1 {
            SegmentKind::Variable
        } else {
            SegmentKind::Collection
        };
        let ok = match expected {
            SegmentKind::Variable => is_variable_token(token),
            SegmentKind::Collection => !is_braced(token),
        };
        if !ok {
            return Err(AlternationError {
                index,
                segment: token.to_string(),
                expected,
                missing: false,
            });
        }
        segments.push(match expected {
            SegmentKind::Variable => Segment::Variable(&token[1..token.len() - 1]),
            SegmentKind::Collection => Segment::Collection(token),
        });
    }

    if let Some(&Segment::Collection(last)) = segments.last() {
        return Err(AlternationError {
            index: segments.len(),
            segment: last.to_string(),
            expected: SegmentKind::Variable,
            missing: true,
        });
    }

    Ok(segments)
}

/// Returns the variable names of a pattern, left to right, duplicates kept.
///
/// `publishers/{publisher}/books/{book}` → `["publisher", "book"]`.
#[must_use]
pub fn extract_variables(pattern: &str) -> Vec<&str> {
    VARIABLE
        .captures_iter(pattern)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect()
}

/// Replaces every variable with `*`.
///
/// `publishers/{publisher}/books/{book}` → `publishers/*/books/*`.
#[must_use]
pub fn plain_form(pattern: &str) -> String {
    VARIABLE.replace_all(pattern, NoExpand(WILDCARD)).into_owned()
}

/// Canonical rendering of a variable name: snake case without `_id` suffixes.
#[must_use]
pub fn canonical_variable(name: &str) -> String {
    let snake = to_snake_case(name);
    let mut trimmed = snake.as_str();
    while let Some(rest) = trimmed.strip_suffix("_id") {
        trimmed = rest;
    }
    trimmed.to_string()
}

/// Returns the pattern with naming errors corrected.
///
/// Collections become lowerCamelCase; variables become their
/// [`canonical_variable`] form.
#[must_use]
pub fn desired_form(pattern: &str) -> String {
    pattern
        .split('/')
        .map(|token| {
            if is_braced(token) {
                format!("{{{}}}", canonical_variable(&token[1..token.len() - 1]))
            } else {
                to_lower_camel_case(token)
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}
