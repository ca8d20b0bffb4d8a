//! Init command implementation.

use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::config_resolver::PROJECT_CONFIG_NAMES;

const DEFAULT_CONFIG: &str = r#"# aep-lint configuration
# Rule reference: https://aep.dev

# Lowest severity that makes `aep-lint check` exit with status 1.
# One of "must", "should", "may".
fail_on = "must"

[analyzer]
# Glob patterns of descriptor files to skip when walking directories
exclude = [
    "**/third_party/**",
    "**/node_modules/**",
]

# Worker threads for rule dispatch; 1 runs sequentially.
# parallelism = 4

# Rule configurations
# Keys are full (`core::0123::resource-pattern`) or short (`resource-pattern`)
# rule names. Each rule can be disabled or have its severity overridden.

[rules.resource-annotation]
enabled = true
# severity = "must"

# [rules."core::0131::request-unknown-fields"]
# enabled = false
"#;

/// Runs the init command in the current directory.
///
/// # Errors
///
/// Returns an error if a config already exists and `force` is not set, or
/// if the file cannot be written.
pub fn run(force: bool) -> Result<()> {
    let config_path = write_config(Path::new("."), force)?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit {} to configure rules", config_path.display());
    println!("  2. Run: aep-lint check path/to/descriptors");

    Ok(())
}

fn write_config(dir: &Path, force: bool) -> Result<std::path::PathBuf> {
    let config_path = dir.join(PROJECT_CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(config_path)
}
