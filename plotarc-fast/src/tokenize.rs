//! Word and sentence splitting.
//!
//! - `get_tokens`: lowercase words; anything that is not an ASCII letter or
//!   an apostrophe is a separator
//! - `get_sentences`: split after runs of `.`, `!`, `?` (plus closing quotes
//!   or brackets) that are followed by whitespace
//! - `batch_get_tokens`: tokenize many sentences in parallel

use lazy_static::lazy_static;
use rayon::prelude::*;
use regex::Regex;

lazy_static! {
    /// Word separators
    static ref NON_WORD: Regex = Regex::new(r"[^A-Za-z']+").unwrap();
    /// Sentence terminator followed by whitespace
    static ref SENTENCE_END: Regex = Regex::new(r#"[.!?]+["')\]]*\s+"#).unwrap();
    /// Collapse runs of whitespace (including newlines) inside a sentence
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Lowercase word tokens of `text`.
#[must_use]
pub fn get_tokens(text: &str) -> Vec<String> {
    NON_WORD
        .split(&text.to_lowercase())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Sentences of `text`, trimmed, with internal whitespace collapsed.
#[must_use]
pub fn get_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for m in SENTENCE_END.find_iter(text) {
        push_sentence(&mut sentences, &text[start..m.end()]);
        start = m.end();
    }
    push_sentence(&mut sentences, &text[start..]);
    sentences
}

fn push_sentence(out: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        out.push(WHITESPACE.replace_all(trimmed, " ").into_owned());
    }
}

/// Tokenize each sentence in parallel, preserving order.
#[must_use]
pub fn batch_get_tokens(sentences: &[String]) -> Vec<Vec<String>> {
    sentences.par_iter().map(|s| get_tokens(s)).collect()
}
