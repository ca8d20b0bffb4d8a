//! Check command implementation.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use aep_lint_core::{Analyzer, LintResult, RuleRegistry, Schema, Severity};
use anyhow::{Context, Result};

use crate::config_resolver;
use crate::discover::{discover, Excludes};
use crate::OutputFormat;

/// Outcome of a check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No finding reached the failing threshold.
    Passed,
    /// At least one finding reached the failing threshold.
    Failed,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Passed => Self::SUCCESS,
            Outcome::Failed => Self::from(1),
        }
    }
}

/// Arguments of the check command.
#[derive(Debug)]
pub struct CheckArgs {
    /// Files or directories to analyze.
    pub paths: Vec<PathBuf>,
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names to restrict the run to.
    pub rules: Option<String>,
    /// Extra exclude patterns.
    pub exclude: Vec<String>,
    /// Failing threshold override.
    pub fail_on: Option<Severity>,
    /// Dispatch thread override.
    pub parallelism: Option<usize>,
    /// Explicit config path.
    pub config: Option<PathBuf>,
}

/// Runs the check command.
///
/// # Errors
///
/// Returns an error if configuration, discovery, or loading fails.
pub fn run(args: &CheckArgs) -> Result<Outcome> {
    let project_dir = project_dir(&args.paths);
    let config = config_resolver::load(project_dir, args.config.as_deref())?;

    let excludes = Excludes::new(
        config
            .analyzer
            .exclude
            .iter()
            .chain(&args.exclude)
            .map(String::as_str),
    )?;
    let fail_on = args.fail_on.unwrap_or_else(|| config.fail_on());

    let registry = aep_lint_rules::registry().context("Failed to register built-in rules")?;
    let registry = match &args.rules {
        Some(filter) => select_rules(&registry, filter),
        None => registry,
    };

    let mut builder = Analyzer::builder().registry(registry).config(config);
    if let Some(threads) = args.parallelism {
        builder = builder.parallelism(threads);
    }
    let analyzer = builder.build().context("Failed to build analyzer")?;

    let files = discover(&args.paths, &excludes)?;
    tracing::info!(
        "Analyzing {} descriptor file(s) with {} rule(s)",
        files.len(),
        analyzer.rule_count()
    );

    let result = lint_files(&analyzer, &files)?;
    super::output::print(&result, args.format)?;

    if result.has_violations_at(fail_on) {
        return Ok(Outcome::Failed);
    }
    Ok(Outcome::Passed)
}

/// Lints each descriptor set in turn and merges the results.
fn lint_files(analyzer: &Analyzer, files: &[PathBuf]) -> Result<LintResult> {
    let mut result = LintResult::new();
    for file in files {
        let schema = Schema::from_file(file)
            .with_context(|| format!("Failed to load schema: {}", file.display()))?;
        result.extend(analyzer.analyze(&schema));
    }
    Ok(result)
}

/// Keeps only the rules named in a comma-separated list.
fn select_rules(registry: &RuleRegistry, filter: &str) -> RuleRegistry {
    let names: Vec<&str> = filter
        .split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .collect();

    for name in &names {
        if registry.get(name).is_none() {
            tracing::warn!("Unknown rule: {}", name);
        }
    }

    registry.filtered(|rule| names.iter().any(|n| rule.name.matches(n)))
}

/// Directory searched for a project config: the first directory argument,
/// or the parent of the first file argument.
fn project_dir(paths: &[PathBuf]) -> &Path {
    match paths.first() {
        Some(p) if p.is_dir() => p,
        Some(p) => p
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new(".")),
        None => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const BOOK: &str = r#"{"files": [{"name": "library.proto", "messages": [{
        "name": "Book",
        "fields": [{"name": "name", "type": "string"}],
        "annotations": {"aep.api.resource": {
            "type": "library.example.com/book", "singular": "book", "plural": "books",
            "patterns": ["publishers/{publisher}/books"]
        }}
    }]}]}"#;

    const AUTHOR: &str = r#"{"files": [{"name": "author.proto", "messages": [{
        "name": "Author",
        "fields": [{"name": "name", "type": "string"}]
    }]}]}"#;

    fn args(paths: Vec<PathBuf>) -> CheckArgs {
        CheckArgs {
            paths,
            format: OutputFormat::Compact,
            rules: None,
            exclude: vec![],
            fail_on: None,
            parallelism: Some(1),
            config: None,
        }
    }

    #[test]
    fn must_findings_fail_the_run() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("book.json"), BOOK).unwrap();

        let code = run(&args(vec![tmp.path().to_path_buf()])).unwrap();
        assert_eq!(code, Outcome::Failed);
    }

    #[test]
    fn should_findings_pass_by_default_but_fail_when_asked() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("author.json"), AUTHOR).unwrap();

        let mut check = args(vec![tmp.path().to_path_buf()]);
        assert_eq!(run(&check).unwrap(), Outcome::Passed);

        check.fail_on = Some(Severity::Should);
        assert_eq!(run(&check).unwrap(), Outcome::Failed);
    }

    #[test]
    fn rule_filter_restricts_the_run() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("book.json"), BOOK).unwrap();

        let mut check = args(vec![tmp.path().to_path_buf()]);
        check.rules = Some("resource-type-name, core::0131::request-unknown-fields".into());
        assert_eq!(run(&check).unwrap(), Outcome::Passed);
    }

    #[test]
    fn project_config_is_picked_up() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("book.json"), BOOK).unwrap();
        fs::write(
            tmp.path().join("aep-lint.toml"),
            "[rules.resource-name-components-alternate]\nenabled = false\n",
        )
        .unwrap();

        assert_eq!(run(&args(vec![tmp.path().to_path_buf()])).unwrap(), Outcome::Passed);
    }

    #[test]
    fn malformed_schema_is_a_setup_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("broken.json"), "{\"files\": [").unwrap();

        let err = run(&args(vec![tmp.path().to_path_buf()])).unwrap_err();
        assert!(err.to_string().starts_with("Failed to load schema"));
        assert!(err.downcast_ref::<aep_lint_core::LoadError>().is_some());
    }

    #[test]
    fn project_dir_of_a_file_is_its_parent() {
        assert_eq!(project_dir(&[PathBuf::from("library.json")]), Path::new("."));
        assert_eq!(project_dir(&[PathBuf::from("api/library.json")]), Path::new("api"));
    }
}
