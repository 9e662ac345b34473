//! User-level configuration for plotarc
//!
//! Supports loading config from:
//! - Environment variables
//! - ~/.config/plotarc/config.toml

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

use crate::tagger::DEFAULT_TIMEOUT_SECS;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UserConfig {
    #[serde(default)]
    pub tagger: TaggerConfig,

    #[serde(default)]
    pub lexicon: LexiconConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TaggerConfig {
    /// Program to run for `--method external`
    pub command: Option<String>,

    /// Extra arguments for the program
    #[serde(default)]
    pub args: Vec<String>,

    /// Seconds before the tagger is killed (0 = no limit)
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LexiconConfig {
    /// CSV table used by `--method custom`
    pub custom_path: Option<PathBuf>,
}

impl UserConfig {
    /// Load config from all sources, with priority:
    /// 1. Environment variables (highest)
    /// 2. User config (~/.config/plotarc/config.toml)
    pub fn load() -> Result<Self> {
        let mut config = UserConfig::default();

        if let Some(user_config) = Self::user_config_path()
            .filter(|p| p.exists())
            .and_then(|p| std::fs::read_to_string(&p).ok())
            .and_then(|content| toml::from_str::<UserConfig>(&content).ok())
        {
            config.merge(user_config);
        }

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Environment variables override everything
    fn apply_env<F: Fn(&str) -> Option<String>>(&mut self, var: F) {
        if let Some(cmd) = var("PLOTARC_TAGGER_CMD").filter(|v| !v.trim().is_empty()) {
            // The variable holds a whole command line
            match split_command_line(&cmd) {
                Some(parts) => {
                    let mut parts = parts.into_iter();
                    self.tagger.command = parts.next();
                    self.tagger.args = parts.collect();
                }
                None => warn!("Ignoring PLOTARC_TAGGER_CMD: unterminated quote in {:?}", cmd),
            }
        }
        if let Some(path) = var("PLOTARC_LEXICON").filter(|v| !v.trim().is_empty()) {
            self.lexicon.custom_path = Some(PathBuf::from(path));
        }
    }

    /// Get the user config directory path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("plotarc").join("config.toml"))
    }

    /// Merge another config into this one (other takes priority)
    fn merge(&mut self, other: UserConfig) {
        if other.tagger.command.is_some() {
            self.tagger.command = other.tagger.command;
            self.tagger.args = other.tagger.args;
        }
        if other.tagger.timeout_secs.is_some() {
            self.tagger.timeout_secs = other.tagger.timeout_secs;
        }
        if other.lexicon.custom_path.is_some() {
            self.lexicon.custom_path = other.lexicon.custom_path;
        }
    }

    /// Full tagger command line (program first), if configured
    pub fn tagger_command(&self) -> Option<Vec<String>> {
        let program = self.tagger.command.as_ref()?;
        let mut cmd = vec![program.clone()];
        cmd.extend(self.tagger.args.iter().cloned());
        Some(cmd)
    }

    pub fn tagger_timeout_secs(&self) -> u64 {
        self.tagger.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    pub fn custom_lexicon(&self) -> Option<&PathBuf> {
        self.lexicon.custom_path.as_ref()
    }

    /// Initialize user config directory and create example config
    pub fn init_user_config() -> Result<PathBuf> {
        let config_path = Self::user_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        if !config_path.exists() {
            let example = r#"# plotarc User Configuration

[tagger]
# Sentence tagger for --method external. It reads one sentence per line on
# stdin and prints one label per line: Very positive, Positive, Neutral,
# Negative, Very negative
# command = "java"
# args = ["-cp", "/opt/corenlp/*", "edu.stanford.nlp.sentiment.SentimentPipeline", "-stdin"]
# timeout_secs = 300

[lexicon]
# CSV table for --method custom (word,value or word,sentiment,value,lang)
# custom_path = "/path/to/lexicon.csv"
"#;
            std::fs::write(&config_path, example)?;
        }

        Ok(config_path)
    }
}

/// Split a command line into words the way a POSIX shell would, without
/// expansion: whitespace separates words, single quotes are literal, double
/// quotes and bare backslashes escape the next character.
///
/// Returns `None` for an unterminated quote.
fn split_command_line(line: &str) -> Option<Vec<String>> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                in_word = true;
                loop {
                    match chars.next()? {
                        '\'' => break,
                        c => word.push(c),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next()? {
                        '"' => break,
                        '\\' => word.push(chars.next()?),
                        c => word.push(c),
                    }
                }
            }
            '\\' => {
                in_word = true;
                if let Some(next) = chars.next() {
                    word.push(next);
                }
            }
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut word));
                    in_word = false;
                }
            }
            c => {
                in_word = true;
                word.push(c);
            }
        }
    }
    if in_word {
        words.push(word);
    }
    Some(words)
}
