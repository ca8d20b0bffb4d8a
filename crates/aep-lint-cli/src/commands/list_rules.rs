//! List rules command implementation.

use std::fmt::Write as _;

use aep_lint_core::RuleRegistry;
use anyhow::{Context, Result};
use serde::Serialize;

use crate::OutputFormat;

#[derive(Serialize)]
struct RuleRow {
    name: String,
    severity: String,
    node: String,
    url: String,
    description: &'static str,
}

/// Runs the list-rules command.
///
/// # Errors
///
/// Returns an error if the built-in rules fail to register.
pub fn run(format: OutputFormat) -> Result<()> {
    let registry = aep_lint_rules::registry().context("Failed to register built-in rules")?;
    print!("{}", render(&registry, format)?);
    Ok(())
}

fn render(registry: &RuleRegistry, format: OutputFormat) -> Result<String> {
    let rows: Vec<RuleRow> = registry
        .iter()
        .map(|rule| RuleRow {
            name: rule.name.to_string(),
            severity: rule.severity.to_string(),
            node: rule.applies_to.to_string(),
            url: rule.name.url(),
            description: rule.description,
        })
        .collect();

    let mut out = String::new();
    match format {
        OutputFormat::Json => {
            out = serde_json::to_string_pretty(&rows)?;
            out.push('\n');
        }
        OutputFormat::Compact => {
            for row in &rows {
                let _ = writeln!(out, "{}", row.name);
            }
        }
        OutputFormat::Text => {
            let _ = writeln!(out, "Available rules:\n");
            let _ = writeln!(out, "{:<50} {:<8} {:<8} Description", "Name", "Severity", "Node");
            let _ = writeln!(out, "{}", "-".repeat(110));
            for row in &rows {
                let _ = writeln!(
                    out,
                    "{:<50} {:<8} {:<8} {}",
                    row.name, row.severity, row.node, row.description
                );
            }
            let _ = writeln!(out, "\nUse --rules to filter specific rules, e.g.:");
            let _ = writeln!(out, "  aep-lint check --rules resource-type-name,resource-pattern");
            let _ = writeln!(out, "  aep-lint check --rules core::0131::request-unknown-fields");
        }
    }
    Ok(out)
}
