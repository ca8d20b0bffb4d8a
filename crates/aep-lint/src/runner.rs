//! One-call entry points over the built-in rule catalog.

use std::fmt::Write as _;
use std::path::Path;

use aep_lint_core::{
    Analyzer, AnalyzerError, Config, LintResult, LoadError, RegistryError, Schema,
};

/// Errors raised before any rule runs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The built-in rules failed to register.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The analyzer could not be built from the configuration.
    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),

    /// The descriptor set could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Lints a schema with every built-in rule.
///
/// # Errors
///
/// Returns an error if the registry or analyzer cannot be built.
pub fn lint(schema: &Schema, config: Config) -> Result<LintResult, Error> {
    let analyzer = Analyzer::builder()
        .registry(aep_lint_rules::registry()?)
        .config(config)
        .build()?;
    Ok(analyzer.analyze(schema))
}

/// Loads a JSON descriptor set and lints it with every built-in rule.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or the analyzer cannot be
/// built.
pub fn lint_file(path: &Path, config: Config) -> Result<LintResult, Error> {
    let schema = Schema::from_file(path)?;
    lint(&schema, config)
}

/// Lints a descriptor set as part of `cargo test`.
///
/// # Panics
///
/// Panics with a formatted report if findings at or above the configured
/// `fail_on` severity are found, or if the run cannot be set up.
pub fn assert_conforms(path: impl AsRef<Path>, config: Config) {
    let path = path.as_ref();
    let fail_on = config.fail_on();
    let result = lint_file(path, config).unwrap_or_else(|e| {
        panic!("aep-lint: failed to lint {}: {e}", path.display());
    });

    if result.has_violations_at(fail_on) {
        let mut report = format!(
            "aep-lint: {} finding(s) at or above `{fail_on}` in {}\n\n",
            result.findings.iter().filter(|f| f.severity >= fail_on).count(),
            path.display()
        );
        for finding in result.findings.iter().filter(|f| f.severity >= fail_on) {
            let _ = writeln!(report, "{}", finding.format());
        }
        panic!("{report}");
    }
}
