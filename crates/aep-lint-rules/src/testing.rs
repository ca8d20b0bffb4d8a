//! Test helpers shared by the rule modules.

use aep_lint_core::{Analyzer, Finding, RuleDescriptor, RuleRegistry, Schema};
use serde_json::{json, Value};

/// Runs a single rule over a schema and returns its findings.
pub(crate) fn run(rule: RuleDescriptor, schema: &Value) -> Vec<Finding> {
    let schema = Schema::from_json(&schema.to_string()).expect("valid schema");
    let registry = RuleRegistry::builder()
        .register(rule.name.proposal(), [rule])
        .expect("rule registers")
        .build();
    let analyzer = Analyzer::builder()
        .registry(registry)
        .parallelism(1)
        .build()
        .expect("analyzer builds");
    analyzer.analyze(&schema).findings
}

/// Wraps messages into a one-file schema.
pub(crate) fn file(messages: Value) -> Value {
    json!({"files": [{"name": "library.proto", "package": "example.library.v1", "messages": messages}]})
}

/// A `Book` message carrying the given resource annotation.
pub(crate) fn book(resource: Value) -> Value {
    file(json!([{
        "name": "Book",
        "fields": [{"name": "name", "type": "string"}],
        "annotations": {"aep.api.resource": resource},
        "location": {"line": 7, "column": 1}
    }]))
}

/// A conforming resource annotation.
pub(crate) fn conforming() -> Value {
    json!({
        "type": "library.example.com/book",
        "singular": "book",
        "plural": "books",
        "patterns": ["publishers/{publisher}/books/{book}"]
    })
}

/// A conforming annotation with one key replaced.
pub(crate) fn conforming_with(key: &str, value: Value) -> Value {
    let mut resource = conforming();
    resource[key] = value;
    resource
}

pub(crate) fn messages(findings: &[Finding]) -> Vec<&str> {
    findings.iter().map(Finding::message).collect()
}
