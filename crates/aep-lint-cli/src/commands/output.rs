//! Shared output formatting for lint results.

use std::fmt::Write as _;
use std::io::IsTerminal;

use aep_lint_core::{LintResult, Severity};
use anyhow::Result;

use crate::OutputFormat;

/// Prints lint results in the specified format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    let color = std::io::stdout().is_terminal();
    print!("{}", render(result, format, color)?);
    Ok(())
}

/// Renders lint results into a string.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(result: &LintResult, format: OutputFormat, color: bool) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => render_text(result, color),
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(result)?),
        OutputFormat::Compact => render_compact(result),
    })
}

fn paint(text: &str, code: &str, color: bool) -> String {
    if color {
        format!("\x1b[{code}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

fn severity_code(severity: Severity) -> &'static str {
    match severity {
        Severity::Must => "31",
        Severity::Should => "33",
        Severity::May => "34",
    }
}

fn render_text(result: &LintResult, color: bool) -> String {
    let mut out = String::new();

    for finding in &result.findings {
        let location = finding.location();
        let _ = writeln!(
            out,
            "{} at {}:{}:{}",
            finding.rule,
            location.file.display(),
            location.line,
            location.column,
        );
        let severity = paint(
            &finding.severity.to_string(),
            severity_code(finding.severity),
            color,
        );
        let _ = writeln!(out, "  {severity}: {}", finding.message());
        if let Some(suggestion) = &finding.problem.suggestion {
            let _ = writeln!(out, "  = help: {}", suggestion.message);
        }
        let _ = writeln!(out, "  = see: {}", finding.rule.url());
        out.push('\n');
    }

    let (must, should, may) = result.count_by_severity();
    let summary_code = if must > 0 {
        "31"
    } else if should > 0 {
        "33"
    } else {
        "32"
    };
    let summary = format!(
        "Found {must} must, {should} should, {may} may finding(s) in {} file(s)",
        result.files_checked
    );
    let _ = writeln!(out, "{}", paint(&summary, summary_code, color));
    out
}

fn render_compact(result: &LintResult) -> String {
    result
        .findings
        .iter()
        .map(|finding| format!("{finding}\n"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aep_lint_core::{Analyzer, Schema};

    fn result() -> LintResult {
        let schema = Schema::from_json(
            r#"{"files": [{"name": "library.proto", "messages": [{
                "name": "Book",
                "location": {"line": 7, "column": 1},
                "fields": [{"name": "name", "type": "string"}],
                "annotations": {"aep.api.resource": {
                    "type": "library.example.com/Book", "singular": "book", "plural": "books",
                    "patterns": ["books/{book}"]
                }}
            }]}]}"#,
        )
        .unwrap();
        Analyzer::builder()
            .registry(aep_lint_rules::registry().unwrap())
            .parallelism(1)
            .build()
            .unwrap()
            .analyze(&schema)
    }

    #[test]
    fn text_output() {
        let out = render(&result(), OutputFormat::Text, false).unwrap();
        insta::assert_snapshot!(out, @r#"
        core::0004::resource-type-name at library.proto:7:1
          must: Type must be kebab-case with alphanumeric characters: "Book"
          = help: use "library.example.com/book"
          = see: https://aep.dev/4

        Found 1 must, 0 should, 0 may finding(s) in 1 file(s)
        "#);
    }

    #[test]
    fn compact_output() {
        let out = render(&result(), OutputFormat::Compact, false).unwrap();
        assert_eq!(
            out,
            "library.proto:7:1: must [core::0004::resource-type-name] Type must be kebab-case with alphanumeric characters: \"Book\"\n"
        );
    }

    #[test]
    fn json_output_is_machine_readable() {
        let out = render(&result(), OutputFormat::Json, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["files_checked"], 1);
        assert_eq!(value["findings"][0]["rule"], "core::0004::resource-type-name");
        assert_eq!(value["findings"][0]["severity"], "must");
        assert_eq!(value["findings"][0]["location"]["line"], 7);
        assert!(value["findings"][0].get("node").is_none());
    }

    #[test]
    fn color_only_when_asked() {
        let out = render(&result(), OutputFormat::Text, true).unwrap();
        assert!(out.contains("\x1b[31mmust\x1b[0m"));
    }
}
