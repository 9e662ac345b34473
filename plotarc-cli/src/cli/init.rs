//! Init command - write an example plotarc.toml

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::{EXAMPLE_PROJECT_CONFIG, PROJECT_CONFIG_FILE};

/// Run the init command
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let dir = dir
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", dir.display()))?;

    if !dir.is_dir() {
        anyhow::bail!("Path is not a directory: {}", dir.display());
    }

    let config_path = dir.join(PROJECT_CONFIG_FILE);
    if config_path.exists() && !force {
        println!(
            "✓ {} already exists (use --force to overwrite)",
            config_path.display()
        );
        return Ok(());
    }

    std::fs::write(&config_path, EXAMPLE_PROJECT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("✓ Created {}", config_path.display());

    println!("\nNext steps:");
    println!("  plotarc trajectory <FILE>     Smoothed arc with these defaults");
    println!("  plotarc config init           External tagger / custom lexicon settings");

    Ok(())
}
