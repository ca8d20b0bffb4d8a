//! # aep-lint-core
//!
//! Core framework for linting API schemas against the AEP naming
//! conventions.
//!
//! This crate provides the building blocks shared by every rule:
//!
//! - [`Schema`] / [`Node`]: the immutable descriptor tree and its walker
//! - [`RuleDescriptor`]: a node-kind tag plus `only_if` and `check` functions
//! - [`RuleRegistry`]: rules registered once at startup, read-only afterwards
//! - [`Analyzer`]: dispatches rules over a schema and collects [`Finding`]s
//! - [`utils`]: case conversion, pattern grammar, resource extraction
//!
//! ## Example
//!
//! ```ignore
//! use aep_lint_core::{Analyzer, RuleRegistry, Schema};
//!
//! let registry = RuleRegistry::builder()
//!     .register(4, my_rules())?
//!     .build();
//!
//! let analyzer = Analyzer::builder().registry(registry).build()?;
//! let result = analyzer.analyze(&Schema::from_file(path)?);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod registry;
mod rule;
mod types;

/// Schema tree, DTOs, and loader.
pub mod schema;

/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use registry::{RegistryBuilder, RegistryError, RuleRegistry};
pub use rule::{CheckFn, OnlyIf, RuleDescriptor, RuleName};
pub use schema::{Annotation, FieldAttrs, LoadError, Node, NodeId, NodeKind, Schema};
pub use types::{Finding, LintResult, Location, Problem, Severity, Suggestion};
