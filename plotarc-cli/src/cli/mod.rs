//! CLI command definitions and handlers

mod bins;
mod context;
mod emotions;
mod entropy;
mod init;
mod sentiment;
mod trajectory;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use context::RunContext;

/// Parse and validate workers count (1-64)
pub(crate) fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// plotarc - sentiment arcs for narrative text
#[derive(Parser, Debug)]
#[command(name = "plotarc")]
#[command(
    version,
    about = "Sentiment arcs for narrative text: sentence scores, DCT-smoothed trajectories, percentage bins and mixed-message entropy",
    long_about = "plotarc scores every sentence of a text against a sentiment lexicon \
(or an external tagger) and turns the resulting sequence into a smoothed, \
length-normalized emotional trajectory you can compare across books.\n\n\
FILE may be '-' to read standard input.",
    after_help = "\
Examples:
  plotarc sentiment novel.txt                      Per-sentence scores (syuzhet lexicon)
  plotarc trajectory novel.txt --format json       100-point DCT trajectory as JSON
  plotarc trajectory novel.txt --low-pass 3 --scale-range
  plotarc trajectory novel.txt --transform fft     Legacy FFT smoothing
  plotarc bins novel.txt --bins 10                 Mean sentiment per 10% of the text
  plotarc entropy chapter.txt                      Mixed-message entropy
  plotarc emotions novel.txt --lang spanish        NRC emotion totals
  cat novel.txt | plotarc sentiment - --method bing"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Number of parallel workers for sentence scoring (1-64)
    #[arg(long, global = true, value_parser = parse_workers)]
    pub workers: Option<usize>,

    /// Output format: text, json
    #[arg(long, short = 'f', global = true, value_parser = ["text", "json"])]
    pub format: Option<String>,

    /// Output file path (default: stdout)
    #[arg(long, short = 'o', global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// How sentences are scored
#[derive(Args, Debug, Clone, Default)]
pub struct ScoringArgs {
    /// Scoring method: syuzhet, bing, afinn, nrc, custom, external
    #[arg(long, short = 'm')]
    pub method: Option<String>,

    /// CSV lexicon for --method custom (word,value or word,sentiment,value,lang)
    #[arg(long)]
    pub lexicon: Option<PathBuf>,

    /// Language of the nrc table
    #[arg(long)]
    pub lang: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score every sentence of a text
    Sentiment {
        /// Text file, or '-' for stdin
        file: PathBuf,

        #[command(flatten)]
        scoring: ScoringArgs,

        /// Add the narrative-time view (positions, divide-by-max, z-scores)
        #[arg(long)]
        narrative_time: bool,
    },

    /// Smooth sentence scores into a fixed-length emotional trajectory
    #[command(after_help = "\
Examples:
  plotarc trajectory novel.txt                           DCT, 5 components, 100 points
  plotarc trajectory novel.txt --low-pass 3 --out-len 10 Coarser shape, 10 points
  plotarc trajectory novel.txt --scale-range             Rescale into [-1, 1]
  plotarc trajectory novel.txt --transform fft --padding-factor 2")]
    Trajectory {
        /// Text file, or '-' for stdin
        file: PathBuf,

        #[command(flatten)]
        scoring: ScoringArgs,

        /// Smoothing engine: dct (recommended) or fft (legacy)
        #[arg(long, short = 't', default_value = "dct", value_parser = ["dct", "fft"])]
        transform: String,

        /// Low-frequency components to keep (default: 5 for dct, 2 for fft)
        #[arg(long)]
        low_pass: Option<usize>,

        /// Number of points in the trajectory (default: 100)
        #[arg(long)]
        out_len: Option<usize>,

        /// Zero padding multiple for the fft transform (default: 2)
        #[arg(long)]
        padding_factor: Option<usize>,

        /// Rescale the trajectory into [-1, 1]
        #[arg(long)]
        scale_range: bool,

        /// Standardize the trajectory to z-scores
        #[arg(long)]
        scale_vals: bool,
    },

    /// Mean sentence score per equal-width chunk of the text
    Bins {
        /// Text file, or '-' for stdin
        file: PathBuf,

        #[command(flatten)]
        scoring: ScoringArgs,

        /// Number of bins (default: 100)
        #[arg(long, short = 'b')]
        bins: Option<usize>,
    },

    /// Mixed-message entropy: how often word sentiment flips sign
    Entropy {
        /// Text file, or '-' for stdin
        file: PathBuf,

        #[command(flatten)]
        scoring: ScoringArgs,

        /// Keep neutral words in the sign distribution
        #[arg(long)]
        keep_neutral: bool,
    },

    /// Per-sentence totals of the eight NRC emotions and two polarities
    Emotions {
        /// Text file, or '-' for stdin
        file: PathBuf,

        /// Language of the nrc table
        #[arg(long)]
        lang: Option<String>,

        /// Use a custom category CSV instead of the built-in nrc table
        #[arg(long)]
        lexicon: Option<PathBuf>,
    },

    /// Write an example plotarc.toml to a directory
    Init {
        /// Target directory
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Overwrite an existing plotarc.toml
        #[arg(long)]
        force: bool,
    },

    /// Manage user configuration (init or show)
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Initialize user config file with example settings
    Init,
    /// Show current config and paths
    Show,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Sentiment {
            file,
            scoring,
            narrative_time,
        } => {
            let ctx = RunContext::new(&cli)?;
            sentiment::run(&ctx, file, scoring, *narrative_time)
        }

        Commands::Trajectory {
            file,
            scoring,
            transform,
            low_pass,
            out_len,
            padding_factor,
            scale_range,
            scale_vals,
        } => {
            let ctx = RunContext::new(&cli)?;
            let options = trajectory::TrajectoryArgs {
                transform: transform.parse()?,
                low_pass: *low_pass,
                out_len: *out_len,
                padding_factor: *padding_factor,
                scale_range: *scale_range,
                scale_vals: *scale_vals,
            };
            trajectory::run(&ctx, file, scoring, &options)
        }

        Commands::Bins {
            file,
            scoring,
            bins,
        } => {
            let ctx = RunContext::new(&cli)?;
            bins::run(&ctx, file, scoring, *bins)
        }

        Commands::Entropy {
            file,
            scoring,
            keep_neutral,
        } => {
            let ctx = RunContext::new(&cli)?;
            entropy::run(&ctx, file, scoring, !keep_neutral)
        }

        Commands::Emotions {
            file,
            lang,
            lexicon,
        } => {
            let ctx = RunContext::new(&cli)?;
            emotions::run(&ctx, file, lang.as_deref(), lexicon.as_deref())
        }

        Commands::Init { dir, force } => init::run(dir, *force),

        Commands::Config { action } => run_config_action(action),

        Commands::Version => {
            println!("plotarc {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn run_config_action(action: &ConfigAction) -> Result<()> {
    use crate::config::UserConfig;
    match action {
        ConfigAction::Init => {
            let path = UserConfig::init_user_config()?;
            println!("Config initialized at: {}", path.display());
            println!("\nEdit it to configure an external tagger or a custom lexicon:");
            println!("  {}", path.display());
            println!("\nOr set via environment:");
            println!("  export PLOTARC_TAGGER_CMD=\"my-tagger --stdin\"");
            println!("  export PLOTARC_LEXICON=/path/to/lexicon.csv");
            Ok(())
        }
        ConfigAction::Show => show_config(),
    }
}

fn show_config() -> Result<()> {
    use crate::config::{UserConfig, PROJECT_CONFIG_FILE};

    let config = UserConfig::load()?;
    println!("Config paths:");
    if let Some(user_path) = UserConfig::user_config_path() {
        let status = if user_path.exists() { "✓" } else { "(not found)" };
        println!("  User:    {} {}", user_path.display(), status);
    }
    let proj_status = if std::path::Path::new(PROJECT_CONFIG_FILE).exists() {
        "✓"
    } else {
        "(not found)"
    };
    println!("  Project: ./{} {}", PROJECT_CONFIG_FILE, proj_status);
    println!();

    match config.tagger_command() {
        Some(cmd) => println!("External tagger: {}", cmd.join(" ")),
        None => println!("External tagger: ✗ not configured"),
    }
    println!("  Timeout: {}s", config.tagger_timeout_secs());
    match config.custom_lexicon() {
        Some(path) => println!("Custom lexicon:  {}", path.display()),
        None => println!("Custom lexicon:  ✗ not set"),
    }
    Ok(())
}
