//! Scoring strategies
//!
//! A `Method` names where sentence values come from. Lexical methods resolve
//! to a `SentimentScorer` over a read-only table; `external` hands whole
//! sentences to an `ExternalTagger` subprocess.

use anyhow::{anyhow, bail, Context, Result};
use plotarc_fast::lexicon::{polarity, Lexicon};
use plotarc_fast::tokenize::get_tokens;
use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::executor::Executor;
use crate::lexicon::{builtin, load_custom_lexicon, BuiltinTable, DEFAULT_LANGUAGE};
use crate::tagger::{CommandTagger, ExternalTagger, TaggerError};

/// Supported scoring methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Syuzhet,
    Bing,
    Afinn,
    Nrc,
    Custom,
    External,
}

impl Method {
    pub const ALL: [Method; 6] = [
        Method::Syuzhet,
        Method::Bing,
        Method::Afinn,
        Method::Nrc,
        Method::Custom,
        Method::External,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Syuzhet => "syuzhet",
            Method::Bing => "bing",
            Method::Afinn => "afinn",
            Method::Nrc => "nrc",
            Method::Custom => "custom",
            Method::External => "external",
        }
    }
}

impl FromStr for Method {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Method::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| {
                anyhow!(
                    "Unknown method '{}'. Valid methods: syuzhet, bing, afinn, nrc, custom, external",
                    s
                )
            })
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lexicon that is either a process-wide built-in or a loaded table.
#[derive(Debug, Clone)]
pub enum SharedLexicon {
    Builtin(&'static Lexicon),
    Loaded(Arc<Lexicon>),
}

impl Deref for SharedLexicon {
    type Target = Lexicon;

    fn deref(&self) -> &Lexicon {
        match self {
            SharedLexicon::Builtin(lex) => lex,
            SharedLexicon::Loaded(lex) => lex,
        }
    }
}

/// Scores one token sequence (a sentence) to one value.
pub trait SentimentScorer: Send + Sync {
    fn name(&self) -> &str;

    fn score_tokens(&self, tokens: &[String]) -> plotarc_fast::Result<f64>;
}

/// Valence and polarity tables: positive rows add, negative rows subtract.
pub struct ValenceScorer {
    name: String,
    lexicon: SharedLexicon,
}

impl ValenceScorer {
    pub fn new(name: impl Into<String>, lexicon: SharedLexicon) -> Self {
        Self {
            name: name.into(),
            lexicon,
        }
    }

    pub fn builtin(table: BuiltinTable) -> Self {
        Self::new(table.name(), SharedLexicon::Builtin(builtin(table)))
    }
}

impl SentimentScorer for ValenceScorer {
    fn name(&self) -> &str {
        &self.name
    }

    fn score_tokens(&self, tokens: &[String]) -> plotarc_fast::Result<f64> {
        Ok(polarity(tokens, &self.lexicon))
    }
}

/// Category tables: polarity is the positive total minus the negative total.
pub struct NrcScorer {
    language: String,
    lexicon: Lexicon,
}

impl NrcScorer {
    /// Built-in NRC rows for one language.
    pub fn new(language: &str) -> Result<Self> {
        let full = builtin(BuiltinTable::Nrc);
        let lexicon = full.for_language(language);
        if lexicon.is_empty() {
            bail!(
                "No nrc entries for language '{}'. Available: {}",
                language,
                full.languages().join(", ")
            );
        }
        debug!("nrc/{}: {} words", language, lexicon.len());
        Ok(Self {
            language: language.to_lowercase(),
            lexicon,
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }
}

impl SentimentScorer for NrcScorer {
    fn name(&self) -> &str {
        "nrc"
    }

    fn score_tokens(&self, tokens: &[String]) -> plotarc_fast::Result<f64> {
        Ok(polarity(tokens, &self.lexicon))
    }
}

/// Everything needed to turn a `Method` into a working scorer.
#[derive(Debug, Clone)]
pub struct ScoringSettings {
    pub method: Method,
    pub language: String,
    pub custom_lexicon: Option<PathBuf>,
    pub tagger_command: Option<Vec<String>>,
    pub tagger_timeout_secs: u64,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            method: Method::default(),
            language: DEFAULT_LANGUAGE.to_string(),
            custom_lexicon: None,
            tagger_command: None,
            tagger_timeout_secs: crate::tagger::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// A resolved scoring strategy.
pub enum Scoring {
    Lexical(Box<dyn SentimentScorer>),
    External(Box<dyn ExternalTagger>),
}

impl Scoring {
    pub fn resolve(settings: &ScoringSettings) -> Result<Self> {
        if settings.method != Method::Nrc
            && settings.method != Method::External
            && !settings.language.eq_ignore_ascii_case(DEFAULT_LANGUAGE)
        {
            warn!(
                "--lang {} only applies to the nrc method; {} scores are language-independent tables",
                settings.language, settings.method
            );
        }

        let scoring = match settings.method {
            Method::Syuzhet => Scoring::Lexical(Box::new(ValenceScorer::builtin(BuiltinTable::Syuzhet))),
            Method::Bing => Scoring::Lexical(Box::new(ValenceScorer::builtin(BuiltinTable::Bing))),
            Method::Afinn => Scoring::Lexical(Box::new(ValenceScorer::builtin(BuiltinTable::Afinn))),
            Method::Nrc => Scoring::Lexical(Box::new(NrcScorer::new(&settings.language)?)),
            Method::Custom => {
                let path = settings.custom_lexicon.as_ref().ok_or_else(|| {
                    anyhow!("method 'custom' needs a lexicon: pass --lexicon FILE, set PLOTARC_LEXICON, or set [lexicon].custom_path in the user config")
                })?;
                let lexicon = load_custom_lexicon(path)?;
                Scoring::Lexical(Box::new(ValenceScorer::new(
                    "custom",
                    SharedLexicon::Loaded(Arc::new(lexicon)),
                )))
            }
            Method::External => {
                let command = settings
                    .tagger_command
                    .clone()
                    .ok_or(TaggerError::NotConfigured)?;
                Scoring::External(Box::new(CommandTagger::new(
                    command,
                    settings.tagger_timeout_secs,
                )?))
            }
        };
        info!("Scoring with {}", scoring.name());
        Ok(scoring)
    }

    pub fn name(&self) -> &str {
        match self {
            Scoring::Lexical(scorer) => scorer.name(),
            Scoring::External(tagger) => tagger.name(),
        }
    }

    /// One value per sentence, in order.
    pub fn score_sentences(&self, sentences: &[String], executor: &Executor) -> Result<Vec<f64>> {
        match self {
            Scoring::Lexical(scorer) => {
                let scorer = scorer.as_ref();
                executor.try_map(sentences, |sentence| scorer.score_tokens(&get_tokens(sentence)))
            }
            Scoring::External(tagger) => tagger
                .sentiment(sentences)
                .with_context(|| format!("external tagger {} failed", tagger.name())),
        }
    }

    /// Per-word values for the entropy metric, one lookup per distinct token.
    pub fn word_scores(&self, tokens: &[String]) -> Result<HashMap<String, f64>> {
        let scorer = match self {
            Scoring::Lexical(scorer) => scorer,
            Scoring::External(_) => {
                bail!("entropy needs per-word values; the external tagger only scores whole sentences")
            }
        };

        let mut scores = HashMap::new();
        for token in tokens {
            if !scores.contains_key(token) {
                let value = scorer.score_tokens(std::slice::from_ref(token))?;
                scores.insert(token.clone(), value);
            }
        }
        Ok(scores)
    }
}
