//! Discovery of JSON descriptor sets on disk.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;
use walkdir::WalkDir;

/// Extension of descriptor set files picked up inside directories.
const DESCRIPTOR_EXTENSION: &str = "json";

/// Compiled exclude patterns.
#[derive(Debug, Default)]
pub struct Excludes {
    patterns: Vec<glob::Pattern>,
}

impl Excludes {
    /// Compiles glob patterns.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid pattern.
    pub fn new<'a>(patterns: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let patterns = patterns
            .into_iter()
            .map(|p| glob::Pattern::new(p).with_context(|| format!("Invalid exclude pattern: {p}")))
            .collect::<Result<_>>()?;
        Ok(Self { patterns })
    }

    /// Returns true if the path matches any pattern.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        self.patterns.iter().any(|p| p.matches_path(path))
    }
}

/// Collects descriptor files under the given paths.
///
/// Files named explicitly are always kept; directories are walked for
/// `*.json` files in a stable order. Duplicates are dropped.
///
/// # Errors
///
/// Returns an error if a path does not exist or a directory cannot be read.
pub fn discover(paths: &[PathBuf], excludes: &Excludes) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        if !path.is_dir() {
            anyhow::bail!("Path not found: {}", path.display());
        }

        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry.with_context(|| format!("Failed to walk {}", path.display()))?;
            let candidate = entry.path();
            if !entry.file_type().is_file()
                || candidate.extension().and_then(|e| e.to_str()) != Some(DESCRIPTOR_EXTENSION)
            {
                continue;
            }
            if excludes.matches(candidate) {
                debug!("Excluding: {}", candidate.display());
                continue;
            }
            files.push(candidate.to_path_buf());
        }
    }

    let mut seen = std::collections::HashSet::new();
    files.retain(|f| seen.insert(f.clone()));
    debug!("Discovered {} descriptor file(s)", files.len());
    Ok(files)
}
