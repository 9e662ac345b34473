//! Lexicon tables for the CLI
//!
//! Built-in tables are embedded CSV, parsed once per process on first use and
//! shared read-only afterwards. Custom tables come from user CSV files with
//! the same shape:
//!
//! ```text
//! word,value                      # valence table (syuzhet / afinn style)
//! word,sentiment                  # polarity table (bing style)
//! word,sentiment,value,lang       # category table (nrc style)
//! ```
//!
//! Missing columns are filled in: a valence row gets its polarity category
//! from the sign of the value, a polarity row without a value is +1/-1, any
//! other category without a value counts 1, and the language defaults to
//! `english`.

use plotarc_fast::lexicon::{Category, Lexicon, LexiconEntry};
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_LANGUAGE: &str = "english";

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read lexicon {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed lexicon {origin}: {source}")]
    Csv {
        origin: String,
        #[source]
        source: csv::Error,
    },

    #[error("lexicon {origin}, row {row}: needs a value or a sentiment column")]
    MissingValue { origin: String, row: usize },

    #[error("lexicon {0} has no entries")]
    Empty(String),
}

/// The tables that ship with the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinTable {
    /// Graded valence, -1.0 ..= 1.0
    Syuzhet,
    /// Binary positive/negative
    Bing,
    /// Integer valence, -5 ..= 5
    Afinn,
    /// Eight emotions plus polarity, per language
    Nrc,
}

impl BuiltinTable {
    pub const ALL: [BuiltinTable; 4] = [
        BuiltinTable::Syuzhet,
        BuiltinTable::Bing,
        BuiltinTable::Afinn,
        BuiltinTable::Nrc,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BuiltinTable::Syuzhet => "syuzhet",
            BuiltinTable::Bing => "bing",
            BuiltinTable::Afinn => "afinn",
            BuiltinTable::Nrc => "nrc",
        }
    }

    fn source(&self) -> &'static str {
        match self {
            BuiltinTable::Syuzhet => include_str!("../../data/syuzhet.csv"),
            BuiltinTable::Bing => include_str!("../../data/bing.csv"),
            BuiltinTable::Afinn => include_str!("../../data/afinn.csv"),
            BuiltinTable::Nrc => include_str!("../../data/nrc.csv"),
        }
    }

    fn cell(&self) -> &'static OnceLock<Lexicon> {
        static SYUZHET: OnceLock<Lexicon> = OnceLock::new();
        static BING: OnceLock<Lexicon> = OnceLock::new();
        static AFINN: OnceLock<Lexicon> = OnceLock::new();
        static NRC: OnceLock<Lexicon> = OnceLock::new();
        match self {
            BuiltinTable::Syuzhet => &SYUZHET,
            BuiltinTable::Bing => &BING,
            BuiltinTable::Afinn => &AFINN,
            BuiltinTable::Nrc => &NRC,
        }
    }
}

/// Get a built-in table, parsing it on first use.
pub fn builtin(table: BuiltinTable) -> &'static Lexicon {
    table.cell().get_or_init(|| {
        let lexicon = read_table(table.source().as_bytes(), table.name())
            .expect("built-in lexicon data is valid CSV");
        debug!(
            "Loaded built-in lexicon {} ({} words, {} rows)",
            table.name(),
            lexicon.len(),
            lexicon.rows()
        );
        lexicon
    })
}

/// Load a user-supplied CSV table.
pub fn load_custom_lexicon(path: &Path) -> Result<Lexicon, LexiconError> {
    let file = std::fs::File::open(path).map_err(|source| LexiconError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let lexicon = read_table(file, &path.display().to_string())?;
    debug!(
        "Loaded custom lexicon {} ({} words)",
        path.display(),
        lexicon.len()
    );
    Ok(lexicon)
}

#[derive(Debug, Deserialize)]
struct Row {
    word: String,
    #[serde(default, alias = "category")]
    sentiment: Option<String>,
    #[serde(default)]
    value: Option<f64>,
    #[serde(default, alias = "language")]
    lang: Option<String>,
}

/// Parse a CSV table with a header row from any reader.
pub fn read_table<R: Read>(reader: R, origin: &str) -> Result<Lexicon, LexiconError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut entries = Vec::new();
    for (i, record) in csv_reader.deserialize::<Row>().enumerate() {
        let row = record.map_err(|source| LexiconError::Csv {
            origin: origin.to_string(),
            source,
        })?;
        entries.push(row_to_entry(row, origin, i + 1)?);
    }

    if entries.is_empty() {
        return Err(LexiconError::Empty(origin.to_string()));
    }
    Ok(Lexicon::from_entries(entries))
}

fn row_to_entry(row: Row, origin: &str, row_number: usize) -> Result<LexiconEntry, LexiconError> {
    let category = row
        .sentiment
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Category>().unwrap_or_else(|never| match never {}));

    let (category, value) = match (category, row.value) {
        (Some(category), Some(value)) => (category, value),
        (None, Some(value)) => (Category::from_valence(value), value),
        (Some(Category::Negative), None) => (Category::Negative, -1.0),
        (Some(category), None) => (category, 1.0),
        (None, None) => {
            return Err(LexiconError::MissingValue {
                origin: origin.to_string(),
                row: row_number,
            })
        }
    };

    Ok(LexiconEntry {
        word: row.word.to_lowercase(),
        category,
        value,
        language: row
            .lang
            .filter(|l| !l.is_empty())
            .map(|l| l.to_lowercase())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
    })
}
