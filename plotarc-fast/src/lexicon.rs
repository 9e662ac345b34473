//! Word -> (category, value) tables and the multiset scorer.
//!
//! A lexicon is read-only once built. The scorer is a plain reduction over
//! tokens, so sharing one `Lexicon` across threads needs no locking.

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{ArcError, Result};

/// Affect / polarity category of a lexicon entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Positive,
    Negative,
    Anger,
    Anticipation,
    Disgust,
    Fear,
    Joy,
    Sadness,
    Surprise,
    Trust,
    Custom(String),
}

impl Category {
    /// The eight basic emotions followed by the two polarities.
    pub const EMOTIONS: [Category; 10] = [
        Category::Anger,
        Category::Anticipation,
        Category::Disgust,
        Category::Fear,
        Category::Joy,
        Category::Sadness,
        Category::Surprise,
        Category::Trust,
        Category::Negative,
        Category::Positive,
    ];

    pub const POLARITY: [Category; 2] = [Category::Positive, Category::Negative];

    pub fn as_str(&self) -> &str {
        match self {
            Category::Positive => "positive",
            Category::Negative => "negative",
            Category::Anger => "anger",
            Category::Anticipation => "anticipation",
            Category::Disgust => "disgust",
            Category::Fear => "fear",
            Category::Joy => "joy",
            Category::Sadness => "sadness",
            Category::Surprise => "surprise",
            Category::Trust => "trust",
            Category::Custom(name) => name,
        }
    }

    /// Polarity category implied by the sign of a valence value.
    pub fn from_valence(value: f64) -> Category {
        if value < 0.0 {
            Category::Negative
        } else {
            Category::Positive
        }
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "positive" => Category::Positive,
            "negative" => Category::Negative,
            "anger" => Category::Anger,
            "anticipation" => Category::Anticipation,
            "disgust" => Category::Disgust,
            "fear" => Category::Fear,
            "joy" => Category::Joy,
            "sadness" => Category::Sadness,
            "surprise" => Category::Surprise,
            "trust" => Category::Trust,
            other => Category::Custom(other.to_string()),
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a lexicon table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub word: String,
    pub category: Category,
    pub value: f64,
    pub language: String,
}

/// What a word maps to: one of possibly several senses.
#[derive(Debug, Clone, PartialEq)]
pub struct Sense {
    pub category: Category,
    pub value: f64,
    pub language: String,
}

/// Immutable word table keyed by lowercase word.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    words: FxHashMap<String, Vec<Sense>>,
    rows: usize,
}

impl Lexicon {
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = LexiconEntry>,
    {
        let mut words: FxHashMap<String, Vec<Sense>> = FxHashMap::default();
        let mut rows = 0;
        for entry in entries {
            rows += 1;
            words
                .entry(entry.word.to_lowercase())
                .or_default()
                .push(Sense {
                    category: entry.category,
                    value: entry.value,
                    language: entry.language,
                });
        }
        Self { words, rows }
    }

    /// Senses for `word` (already lowercase), empty if absent.
    pub fn lookup(&self, word: &str) -> &[Sense] {
        self.words.get(word).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Number of (word, category) rows, duplicates included
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Rows tagged with `language` (case-insensitive).
    pub fn for_language(&self, language: &str) -> Lexicon {
        let wanted = language.to_lowercase();
        let mut rows = 0;
        let words: FxHashMap<String, Vec<Sense>> = self
            .words
            .iter()
            .filter_map(|(word, senses)| {
                let kept: Vec<Sense> = senses
                    .iter()
                    .filter(|s| s.language.to_lowercase() == wanted)
                    .cloned()
                    .collect();
                rows += kept.len();
                (!kept.is_empty()).then(|| (word.clone(), kept))
            })
            .collect();
        Lexicon { words, rows }
    }

    /// Distinct language tags present in the table.
    pub fn languages(&self) -> Vec<String> {
        let mut langs: Vec<String> = self
            .words
            .values()
            .flat_map(|senses| senses.iter().map(|s| s.language.clone()))
            .collect();
        langs.sort();
        langs.dedup();
        langs
    }
}

/// Sum the values of every (token, category) match.
///
/// Tokens are matched as given (callers lowercase them). Repeated tokens count
/// once per occurrence; a token listed under several requested categories
/// contributes each of those values.
///
/// # Errors
/// - `InvalidInput` if `categories` is empty
pub fn score<S: AsRef<str>>(tokens: &[S], lexicon: &Lexicon, categories: &[Category]) -> Result<f64> {
    if categories.is_empty() {
        return Err(ArcError::InvalidInput(
            "at least one category must be requested".to_string(),
        ));
    }

    Ok(tokens
        .iter()
        .flat_map(|t| lexicon.lookup(t.as_ref()))
        .filter(|sense| categories.contains(&sense.category))
        .map(|sense| sense.value)
        .sum())
}

/// Signed polarity of a token sequence.
///
/// `positive` rows add the magnitude of their value and `negative` rows
/// subtract it, so a table that stores negative words as `-1` (bing style)
/// and one that stores them as `1` under `negative` (nrc style) agree. Other
/// categories are ignored.
pub fn polarity<S: AsRef<str>>(tokens: &[S], lexicon: &Lexicon) -> f64 {
    tokens
        .iter()
        .flat_map(|t| lexicon.lookup(t.as_ref()))
        .map(|sense| match sense.category {
            Category::Positive => sense.value.abs(),
            Category::Negative => -sense.value.abs(),
            _ => 0.0,
        })
        .sum()
}

/// Score many token sequences in parallel against one shared lexicon.
pub fn batch_score<S>(texts: &[Vec<S>], lexicon: &Lexicon, categories: &[Category]) -> Result<Vec<f64>>
where
    S: AsRef<str> + Sync,
{
    if categories.is_empty() {
        return Err(ArcError::InvalidInput(
            "at least one category must be requested".to_string(),
        ));
    }
    texts
        .par_iter()
        .map(|tokens| score(tokens, lexicon, categories))
        .collect()
}

/// Per-category totals over the ten emotion/polarity categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EmotionCounts {
    pub anger: f64,
    pub anticipation: f64,
    pub disgust: f64,
    pub fear: f64,
    pub joy: f64,
    pub sadness: f64,
    pub surprise: f64,
    pub trust: f64,
    pub negative: f64,
    pub positive: f64,
}

impl EmotionCounts {
    fn add(&mut self, category: &Category, value: f64) {
        let slot = match category {
            Category::Anger => &mut self.anger,
            Category::Anticipation => &mut self.anticipation,
            Category::Disgust => &mut self.disgust,
            Category::Fear => &mut self.fear,
            Category::Joy => &mut self.joy,
            Category::Sadness => &mut self.sadness,
            Category::Surprise => &mut self.surprise,
            Category::Trust => &mut self.trust,
            Category::Negative => &mut self.negative,
            Category::Positive => &mut self.positive,
            Category::Custom(_) => return,
        };
        // Polarity totals are magnitudes whatever sign the table stores
        let value = match category {
            Category::Negative | Category::Positive => value.abs(),
            _ => value,
        };
        *slot += value;
    }

    /// `positive - negative`
    pub fn polarity(&self) -> f64 {
        self.positive - self.negative
    }

    /// Values in `Category::EMOTIONS` order.
    pub fn as_array(&self) -> [f64; 10] {
        [
            self.anger,
            self.anticipation,
            self.disgust,
            self.fear,
            self.joy,
            self.sadness,
            self.surprise,
            self.trust,
            self.negative,
            self.positive,
        ]
    }
}

impl std::ops::AddAssign for EmotionCounts {
    fn add_assign(&mut self, other: EmotionCounts) {
        self.anger += other.anger;
        self.anticipation += other.anticipation;
        self.disgust += other.disgust;
        self.fear += other.fear;
        self.joy += other.joy;
        self.sadness += other.sadness;
        self.surprise += other.surprise;
        self.trust += other.trust;
        self.negative += other.negative;
        self.positive += other.positive;
    }
}

pub fn emotion_counts<S: AsRef<str>>(tokens: &[S], lexicon: &Lexicon) -> EmotionCounts {
    let mut counts = EmotionCounts::default();
    for sense in tokens.iter().flat_map(|t| lexicon.lookup(t.as_ref())) {
        counts.add(&sense.category, sense.value);
    }
    counts
}
