//! Configuration module for plotarc
//!
//! This module handles:
//! - Project-level defaults (plotarc.toml)
//! - User-level settings (~/.config/plotarc/config.toml)

mod project_config;
mod user_config;

pub use project_config::{
    load_project_config, CliDefaults, ProjectConfig, TransformDefaults, EXAMPLE_PROJECT_CONFIG,
    PROJECT_CONFIG_FILE,
};
pub use user_config::{LexiconConfig, TaggerConfig, UserConfig};
