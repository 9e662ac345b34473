//! Per-run settings: CLI flags layered over project and user config

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{parse_workers, Cli, ScoringArgs};
use crate::config::{load_project_config, ProjectConfig, UserConfig};
use crate::executor::Executor;
use crate::lexicon::DEFAULT_LANGUAGE;
use crate::models::Report;
use crate::reporters::{self, OutputFormat};
use crate::sentiment::{Method, ScoringSettings};

/// Workers used when neither the flag nor plotarc.toml sets a count
pub(crate) const DEFAULT_WORKERS: usize = 4;

pub(crate) struct RunContext {
    pub project: ProjectConfig,
    pub user: UserConfig,
    pub executor: Executor,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

impl RunContext {
    pub fn new(cli: &Cli) -> Result<Self> {
        let project = load_project_config(Path::new("."));
        let user = UserConfig::load()?;
        Self::resolve(cli, project, user)
    }

    fn resolve(cli: &Cli, project: ProjectConfig, user: UserConfig) -> Result<Self> {
        let workers = match cli.workers {
            Some(n) => n,
            None => match project.defaults.workers {
                Some(n) => parse_workers(&n.to_string())
                    .map_err(|e| anyhow::anyhow!("plotarc.toml [defaults].workers: {}", e))?,
                None => DEFAULT_WORKERS,
            },
        };

        let format = cli
            .format
            .as_deref()
            .or(project.defaults.format.as_deref())
            .map(str::parse::<OutputFormat>)
            .transpose()?
            .unwrap_or_default();

        debug!("workers={} format={}", workers, format);
        Ok(Self {
            project,
            user,
            executor: Executor::from_workers(workers),
            format,
            output: cli.output.clone(),
        })
    }

    /// Language from the flag, then plotarc.toml, then english.
    pub fn language(&self, flag: Option<&str>) -> String {
        flag.or(self.project.defaults.language.as_deref())
            .unwrap_or(DEFAULT_LANGUAGE)
            .to_lowercase()
    }

    pub fn scoring_settings(&self, args: &ScoringArgs) -> Result<ScoringSettings> {
        let method = match args.method.as_deref().or(self.project.defaults.method.as_deref()) {
            Some(name) => name.parse::<Method>()?,
            None => Method::default(),
        };

        let custom_lexicon = args
            .lexicon
            .clone()
            .or_else(|| self.user.custom_lexicon().cloned());

        // A lexicon file on the command line implies the custom method
        let method = if args.lexicon.is_some() && args.method.is_none() {
            Method::Custom
        } else {
            method
        };
        if args.lexicon.is_some() && method != Method::Custom {
            bail!("--lexicon only applies to --method custom (got --method {})", method);
        }

        Ok(ScoringSettings {
            method,
            language: self.language(args.lang.as_deref()),
            custom_lexicon,
            tagger_command: self.user.tagger_command(),
            tagger_timeout_secs: self.user.tagger_timeout_secs(),
        })
    }

    /// Render and write a report to `-o` or stdout.
    pub fn emit(&self, report: Report) -> Result<()> {
        let rendered = reporters::render(&report, self.format)?;
        match &self.output {
            Some(path) => {
                std::fs::write(path, &rendered)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                eprintln!("Report written to: {}", path.display());
            }
            None => println!("{}", rendered),
        }
        Ok(())
    }
}
