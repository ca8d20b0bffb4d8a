//! Core analyzer: walks the schema and dispatches rules per node.

use crate::config::Config;
use crate::registry::RuleRegistry;
use crate::schema::{Node, Schema};
use crate::types::{Finding, LintResult};

use rayon::prelude::*;
use rayon::ThreadPool;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while building an analyzer.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// `parallelism = 0` was requested.
    #[error("parallelism must be at least 1")]
    InvalidParallelism,

    /// The worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Debug, Default)]
pub struct AnalyzerBuilder {
    registry: Option<RuleRegistry>,
    config: Option<Config>,
    parallelism: Option<usize>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rule registry.
    #[must_use]
    pub fn registry(mut self, registry: RuleRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the number of dispatch threads, overriding the configuration.
    #[must_use]
    pub fn parallelism(mut self, threads: usize) -> Self {
        self.parallelism = Some(threads);
        self
    }

    /// Builds the analyzer.
    ///
    /// Rules disabled by the configuration are dropped here, once.
    ///
    /// # Errors
    ///
    /// Returns an error if the requested worker pool cannot be created.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();
        let registry = self.registry.unwrap_or_default().filtered(|rule| {
            let enabled = config.is_rule_enabled(rule.name);
            if !enabled {
                debug!("Skipping disabled rule: {}", rule.name);
            }
            enabled
        });

        let execution = match self.parallelism.or(config.analyzer.parallelism) {
            Some(0) => return Err(AnalyzerError::InvalidParallelism),
            Some(1) => Execution::Sequential,
            Some(threads) => Execution::Pool(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()?,
            ),
            None => Execution::Global,
        };

        Ok(Analyzer {
            registry,
            config,
            execution,
        })
    }
}

#[derive(Debug)]
enum Execution {
    Sequential,
    Global,
    Pool(ThreadPool),
}

/// Runs lint passes over schemas.
///
/// The analyzer is immutable; one instance can serve any number of passes,
/// concurrently if needed. Use [`Analyzer::builder()`] to construct one.
#[derive(Debug)]
pub struct Analyzer {
    registry: RuleRegistry,
    config: Config,
    execution: Execution,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the active rules.
    #[must_use]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the number of active rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.registry.len()
    }

    /// Runs one lint pass.
    ///
    /// Nodes may be checked concurrently, but findings are always reported
    /// in traversal order, then rule-identity order within a node.
    #[must_use]
    pub fn analyze(&self, schema: &Schema) -> LintResult {
        let nodes: Vec<Node<'_>> = schema.walk().collect();
        info!(
            "Linting {} node(s) with {} rule(s)",
            nodes.len(),
            self.rule_count()
        );

        let per_node: Vec<Vec<Finding>> = match &self.execution {
            Execution::Sequential => nodes.iter().map(|&node| self.dispatch(node)).collect(),
            Execution::Global => nodes.par_iter().map(|&node| self.dispatch(node)).collect(),
            Execution::Pool(pool) => {
                pool.install(|| nodes.par_iter().map(|&node| self.dispatch(node)).collect())
            }
        };

        let result = LintResult {
            findings: per_node.into_iter().flatten().collect(),
            files_checked: schema.files().count(),
            nodes_visited: nodes.len(),
        };

        info!(
            "Lint pass complete: {} finding(s) in {} file(s)",
            result.findings.len(),
            result.files_checked
        );
        result
    }

    /// Offers one node to every rule registered for its kind.
    #[must_use]
    pub fn dispatch(&self, node: Node<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();

        for rule in self.registry.rules_for(node.kind()) {
            if !rule.is_active(node) {
                continue;
            }
            let severity = self
                .config
                .rule_severity(rule.name)
                .unwrap_or(rule.severity);
            findings.extend(
                rule.run(node)
                    .into_iter()
                    .map(|problem| Finding::new(rule.name, severity, problem)),
            );
        }

        findings
    }
}
