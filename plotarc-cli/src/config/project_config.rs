//! Project-level configuration support
//!
//! Loads per-project defaults from `plotarc.toml` or `.plotarcrc.json` in the
//! working directory.
//!
//! # Configuration Format
//!
//! ```toml
//! # plotarc.toml
//!
//! [defaults]
//! method = "syuzhet"
//! language = "english"
//! format = "text"
//! workers = 4
//!
//! [transform]
//! low_pass_size = 5
//! out_len = 100
//! padding_factor = 2
//! bins = 100
//! ```
//!
//! Command-line flags win over these values, which win over built-in defaults.

use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

pub const PROJECT_CONFIG_FILE: &str = "plotarc.toml";
const PROJECT_CONFIG_JSON: &str = ".plotarcrc.json";

/// Project-level configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    #[serde(default)]
    pub defaults: CliDefaults,

    #[serde(default)]
    pub transform: TransformDefaults,
}

/// Default CLI flags that can be set in project config
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CliDefaults {
    /// Scoring method (syuzhet, bing, afinn, nrc, custom, external)
    #[serde(default)]
    pub method: Option<String>,

    /// Language for nrc scoring and emotions
    #[serde(default)]
    pub language: Option<String>,

    /// Output format (text, json)
    #[serde(default)]
    pub format: Option<String>,

    /// Number of workers
    #[serde(default)]
    pub workers: Option<usize>,
}

/// Transform and binning parameters
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TransformDefaults {
    #[serde(default)]
    pub low_pass_size: Option<usize>,

    #[serde(default)]
    pub out_len: Option<usize>,

    #[serde(default)]
    pub padding_factor: Option<usize>,

    #[serde(default)]
    pub bins: Option<usize>,
}

/// Load project configuration from `dir`.
///
/// Searches `plotarc.toml` first, then `.plotarcrc.json`. A file that fails to
/// parse is logged and skipped; with nothing usable the defaults are returned.
pub fn load_project_config(dir: &Path) -> ProjectConfig {
    let toml_path = dir.join(PROJECT_CONFIG_FILE);
    if toml_path.exists() {
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", toml_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", toml_path.display(), e);
            }
        }
    }

    let json_path = dir.join(PROJECT_CONFIG_JSON);
    if json_path.exists() {
        match load_json_config(&json_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", json_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", json_path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

fn load_toml_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

fn load_json_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Contents written by `plotarc init`
pub const EXAMPLE_PROJECT_CONFIG: &str = r#"# plotarc project configuration
# Command-line flags override everything in this file.

[defaults]
# Scoring method: syuzhet, bing, afinn, nrc, custom, external
method = "syuzhet"
# Language for nrc scoring and the emotions command
language = "english"
# Output format: text, json
format = "text"
# Parallel workers for sentence scoring (1-64)
workers = 4

[transform]
# DCT keeps this many low-frequency components (fft default is 2)
low_pass_size = 5
# Length of the resampled trajectory
out_len = 100
# Zero padding multiple for the legacy fft transform
padding_factor = 2
# Number of percentage bins
bins = 100
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_project_config(dir.path());
        assert!(config.defaults.method.is_none());
        assert!(config.transform.out_len.is_none());
    }

    #[test]
    fn test_toml_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(PROJECT_CONFIG_FILE),
            "[defaults]\nmethod = \"bing\"\nworkers = 2\n\n[transform]\nlow_pass_size = 3\nbins = 10\n",
        )
        .unwrap();
        let config = load_project_config(dir.path());
        assert_eq!(config.defaults.method.as_deref(), Some("bing"));
        assert_eq!(config.defaults.workers, Some(2));
        assert_eq!(config.transform.low_pass_size, Some(3));
        assert_eq!(config.transform.bins, Some(10));
        assert!(config.transform.padding_factor.is_none());
    }

    #[test]
    fn test_json_fallback() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(PROJECT_CONFIG_JSON),
            r#"{"defaults": {"format": "json"}, "transform": {"out_len": 50}}"#,
        )
        .unwrap();
        let config = load_project_config(dir.path());
        assert_eq!(config.defaults.format.as_deref(), Some("json"));
        assert_eq!(config.transform.out_len, Some(50));
    }

    #[test]
    fn test_broken_toml_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PROJECT_CONFIG_FILE), "[defaults\nmethod = ").unwrap();
        std::fs::write(
            dir.path().join(PROJECT_CONFIG_JSON),
            r#"{"defaults": {"method": "afinn"}}"#,
        )
        .unwrap();
        let config = load_project_config(dir.path());
        assert_eq!(config.defaults.method.as_deref(), Some("afinn"));
    }

    #[test]
    fn test_example_config_parses() {
        let config: ProjectConfig = toml::from_str(EXAMPLE_PROJECT_CONFIG).unwrap();
        assert_eq!(config.defaults.method.as_deref(), Some("syuzhet"));
        assert_eq!(config.transform.out_len, Some(100));
        assert_eq!(config.transform.padding_factor, Some(2));
    }
}
