//! # aep-lint
//!
//! Linter for API schemas following the AEP resource naming conventions.
//!
//! This is the facade crate that re-exports the core framework and the
//! built-in rules.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use aep_lint::{Config, Schema};
//!
//! let schema = Schema::from_file("api/library.json".as_ref())?;
//! let result = aep_lint::lint(&schema, Config::default())?;
//! for finding in &result.findings {
//!     println!("{finding}");
//! }
//! ```
//!
//! ## `cargo test` Integration
//!
//! ```rust,ignore
//! // tests/api_conformance.rs
//! #[test]
//! fn library_api_conforms() {
//!     aep_lint::assert_conforms("api/library.json", aep_lint::Config::default());
//! }
//! ```

#![forbid(unsafe_code)]

pub use aep_lint_core::*;

/// Built-in rules grouped by AEP proposal.
pub mod rules {
    pub use aep_lint_rules::*;
}

mod runner;

pub use runner::{assert_conforms, lint, lint_file, Error};
