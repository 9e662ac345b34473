//! Text-to-arc pipeline
//!
//! Orchestrates one command run:
//! 1. Read the document (file or stdin)
//! 2. Split it into sentences
//! 3. Score every sentence with the chosen strategy
//! 4. Smooth, bin or summarize the resulting sequence
//!
//! Each step returns a report model; rendering happens in `reporters`.

use anyhow::{anyhow, Context, Result};
use plotarc_fast::binning::bin_means;
use plotarc_fast::dct::{dct_transform, DctOptions};
use plotarc_fast::entropy::mixed_message_entropy;
use plotarc_fast::fft::{fft_transform, FftOptions};
use plotarc_fast::lexicon::{emotion_counts, EmotionCounts, Lexicon};
use plotarc_fast::rescale::narrative_time;
use plotarc_fast::tokenize::{get_sentences, get_tokens};
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use crate::executor::Executor;
use crate::models::{
    Bin, BinsReport, EmotionReport, EntropyReport, SentenceEmotions, SentenceScore,
    SentimentReport, Summary, TrajectoryReport,
};
use crate::sentiment::Scoring;

/// Source name used for standard input
pub const STDIN_SOURCE: &str = "<stdin>";

/// A document and where it came from.
#[derive(Debug, Clone)]
pub struct Document {
    pub source: String,
    pub text: String,
}

impl Document {
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
        }
    }

    /// Read `path`, or standard input when `path` is `-`.
    pub fn read(path: &Path) -> Result<Self> {
        if path.as_os_str() == "-" {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read standard input")?;
            return Ok(Self::new(STDIN_SOURCE, text));
        }

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Self::new(path.display().to_string(), text))
    }

    pub fn sentences(&self) -> Vec<String> {
        get_sentences(&self.text)
    }
}

/// Split and score a document: the raw sentiment sequence.
pub fn score_document(
    doc: &Document,
    scoring: &Scoring,
    executor: &Executor,
) -> Result<(Vec<String>, Vec<f64>)> {
    let sentences = doc.sentences();
    info!(
        "Scoring {} sentences from {} with {}",
        sentences.len(),
        doc.source,
        scoring.name()
    );
    let values = scoring.score_sentences(&sentences, executor)?;
    Ok((sentences, values))
}

pub fn sentiment(
    doc: &Document,
    scoring: &Scoring,
    executor: &Executor,
    with_narrative_time: bool,
) -> Result<SentimentReport> {
    let (sentences, values) = score_document(doc, scoring, executor)?;

    let narrative_time = if with_narrative_time {
        Some(narrative_time(&values).context("narrative time rescale failed")?)
    } else {
        None
    };

    Ok(SentimentReport {
        source: doc.source.clone(),
        method: scoring.name().to_string(),
        summary: Summary::from_values(&values),
        sentences: sentences
            .into_iter()
            .zip(values)
            .enumerate()
            .map(|(i, (text, value))| SentenceScore {
                index: i + 1,
                text,
                value,
            })
            .collect(),
        narrative_time,
    })
}

/// Frequency-domain smoothing engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transform {
    #[default]
    Dct,
    Fft,
}

impl FromStr for Transform {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dct" => Ok(Transform::Dct),
            "fft" => Ok(Transform::Fft),
            _ => Err(anyhow!("Unknown transform '{}'. Valid transforms: dct, fft", s)),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Dct => write!(f, "dct"),
            Transform::Fft => write!(f, "fft"),
        }
    }
}

/// Trajectory parameters after CLI and config resolution.
///
/// `None` picks the engine's own default, which differs between the two
/// engines for `low_pass_size`.
#[derive(Debug, Clone, Default)]
pub struct TrajectoryParams {
    pub transform: Transform,
    pub low_pass_size: Option<usize>,
    pub out_len: Option<usize>,
    pub padding_factor: Option<usize>,
    pub scale_range: bool,
    pub scale_vals: bool,
}

impl TrajectoryParams {
    fn scaling_label(&self) -> &'static str {
        match (self.scale_range, self.scale_vals) {
            (true, false) => "range",
            (false, true) => "zscore",
            (false, false) => "none",
            (true, true) => "conflicting",
        }
    }
}

pub fn trajectory(
    doc: &Document,
    scoring: &Scoring,
    executor: &Executor,
    params: &TrajectoryParams,
) -> Result<TrajectoryReport> {
    let (sentences, values) = score_document(doc, scoring, executor)?;

    let (values, low_pass_size, out_len, padding_factor) = match params.transform {
        Transform::Dct => {
            let defaults = DctOptions::default();
            let options = DctOptions {
                low_pass_size: params.low_pass_size.unwrap_or(defaults.low_pass_size),
                out_len: params.out_len.unwrap_or(defaults.out_len),
                scale_range: params.scale_range,
                scale_vals: params.scale_vals,
            };
            debug!("DCT options: {:?}", options);
            let smoothed = dct_transform(&values, &options)
                .with_context(|| format!("DCT transform of {} failed", doc.source))?;
            (smoothed, options.low_pass_size, options.out_len, None)
        }
        Transform::Fft => {
            let defaults = FftOptions::default();
            let options = FftOptions {
                low_pass_size: params.low_pass_size.unwrap_or(defaults.low_pass_size),
                out_len: params.out_len.unwrap_or(defaults.out_len),
                padding_factor: params.padding_factor.unwrap_or(defaults.padding_factor),
                scale_range: params.scale_range,
                scale_vals: params.scale_vals,
            };
            debug!("FFT options: {:?}", options);
            let smoothed = fft_transform(&values, &options)
                .with_context(|| format!("FFT transform of {} failed", doc.source))?;
            (
                smoothed,
                options.low_pass_size,
                options.out_len,
                Some(options.padding_factor),
            )
        }
    };

    Ok(TrajectoryReport {
        source: doc.source.clone(),
        method: scoring.name().to_string(),
        transform: params.transform.to_string(),
        low_pass_size,
        out_len,
        padding_factor,
        scaling: params.scaling_label().to_string(),
        sentence_count: sentences.len(),
        values,
    })
}

pub fn bins(
    doc: &Document,
    scoring: &Scoring,
    executor: &Executor,
    bins: usize,
) -> Result<BinsReport> {
    let (sentences, values) = score_document(doc, scoring, executor)?;
    let means = bin_means(&values, bins)
        .with_context(|| format!("Binning {} into {} bins failed", doc.source, bins))?;

    Ok(BinsReport {
        source: doc.source.clone(),
        method: scoring.name().to_string(),
        sentence_count: sentences.len(),
        bins: means
            .into_iter()
            .map(|(bin, mean)| Bin { bin, mean })
            .collect(),
    })
}

/// Mixed-message entropy over every word of the document.
pub fn entropy(doc: &Document, scoring: &Scoring, remove_neutral: bool) -> Result<EntropyReport> {
    let tokens = get_tokens(&doc.text);
    let scores = scoring.word_scores(&tokens)?;
    let result = mixed_message_entropy(
        &tokens,
        |token| scores.get(token).copied().unwrap_or(0.0),
        remove_neutral,
    );
    debug!("{}: {:?}", doc.source, result);

    Ok(EntropyReport::new(
        doc.source.clone(),
        scoring.name().to_string(),
        tokens.len(),
        remove_neutral,
        result,
    ))
}

/// Per-sentence emotion totals against a category lexicon.
pub fn emotions(
    doc: &Document,
    lexicon: &Lexicon,
    language: &str,
    executor: &Executor,
) -> Result<EmotionReport> {
    let sentences = doc.sentences();
    let per_sentence = executor.map(&sentences, |s| emotion_counts(&get_tokens(s), lexicon))?;

    let mut totals = EmotionCounts::default();
    for counts in &per_sentence {
        totals += *counts;
    }

    Ok(EmotionReport {
        source: doc.source.clone(),
        language: language.to_string(),
        totals,
        sentences: per_sentence
            .into_iter()
            .enumerate()
            .map(|(i, counts)| SentenceEmotions {
                index: i + 1,
                counts,
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{builtin, BuiltinTable};
    use crate::sentiment::{Method, ScoringSettings};
    use plotarc_fast::errors::ArcError;

    fn bing() -> Scoring {
        Scoring::resolve(&ScoringSettings {
            method: Method::Bing,
            ..Default::default()
        })
        .unwrap()
    }

    fn story() -> Document {
        let text = "It was a good day. Everyone was happy and loved the sun. \
                    Then the storm came. It was awful and everyone was afraid. \
                    The house was a disaster. They hated the cold night. \
                    Morning came slowly. The sun returned and it was beautiful. \
                    They were happy again. What a wonderful, good life! \
                    Nothing was wrong. The end.";
        Document::new("story", text)
    }

    fn arc_error(err: &anyhow::Error) -> Option<&ArcError> {
        err.downcast_ref::<ArcError>()
    }

    #[test]
    fn test_read_file_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, "One. Two.").unwrap();
        let doc = Document::read(&path).unwrap();
        assert_eq!(doc.sentences(), vec!["One.", "Two."]);
        assert!(doc.source.ends_with("doc.txt"));

        let err = Document::read(&dir.path().join("nope.txt")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_sentiment_report() {
        let report = sentiment(&story(), &bing(), &Executor::Sequential, true).unwrap();
        assert_eq!(report.method, "bing");
        assert_eq!(report.sentences.len(), 12);
        assert_eq!(report.sentences[0].index, 1);
        assert_eq!(report.sentences[0].value, 1.0);
        assert!(report.sentences[3].value < 0.0);
        let nt = report.narrative_time.unwrap();
        assert_eq!(nt.x.len(), 12);
        assert!((nt.x[11] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_dct_trajectory() {
        let params = TrajectoryParams {
            low_pass_size: Some(3),
            out_len: Some(20),
            scale_range: true,
            ..Default::default()
        };
        let report = trajectory(&story(), &bing(), &Executor::from_workers(2), &params).unwrap();
        assert_eq!(report.values.len(), 20);
        assert_eq!(report.transform, "dct");
        assert_eq!(report.scaling, "range");
        assert_eq!(report.sentence_count, 12);
        assert!(report.padding_factor.is_none());
        let max = report.values.iter().copied().fold(f64::MIN, f64::max);
        let min = report.values.iter().copied().fold(f64::MAX, f64::min);
        assert!((max - 1.0).abs() < 1e-9);
        assert!((min + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_fft_trajectory_uses_its_defaults() {
        let params = TrajectoryParams {
            transform: Transform::Fft,
            out_len: Some(30),
            ..Default::default()
        };
        let report = trajectory(&story(), &bing(), &Executor::Sequential, &params).unwrap();
        assert_eq!(report.low_pass_size, 2);
        assert_eq!(report.padding_factor, Some(2));
        assert_eq!(report.values.len(), 30);
        assert_eq!(report.scaling, "none");
    }

    #[test]
    fn test_trajectory_errors_surface_core_errors() {
        let too_wide = TrajectoryParams {
            low_pass_size: Some(50),
            ..Default::default()
        };
        let err = trajectory(&story(), &bing(), &Executor::Sequential, &too_wide).unwrap_err();
        assert!(matches!(arc_error(&err), Some(ArcError::InvalidParameter(_))));

        let both = TrajectoryParams {
            scale_range: true,
            scale_vals: true,
            ..Default::default()
        };
        let err = trajectory(&story(), &bing(), &Executor::Sequential, &both).unwrap_err();
        assert!(matches!(arc_error(&err), Some(ArcError::ConflictingOptions(_))));

        let empty = Document::new("empty", "   ");
        let err = trajectory(&empty, &bing(), &Executor::Sequential, &TrajectoryParams::default())
            .unwrap_err();
        assert!(matches!(arc_error(&err), Some(ArcError::InvalidInput(_))));
    }

    #[test]
    fn test_bins() {
        let report = bins(&story(), &bing(), &Executor::Sequential, 3).unwrap();
        assert_eq!(report.bins.len(), 3);
        assert_eq!(report.bins[2].bin, 3);
        assert!(report.bins.iter().all(|b| b.mean.is_finite()));

        let err = bins(&story(), &bing(), &Executor::Sequential, 7).unwrap_err();
        assert!(matches!(
            arc_error(&err),
            Some(ArcError::InsufficientData { needed: 14, got: 12 })
        ));
    }

    #[test]
    fn test_entropy() {
        let same = Document::new("same", "I love, love, love it");
        let report = entropy(&same, &bing(), true).unwrap();
        assert_eq!(report.entropy, 0.0);
        assert_eq!(report.metric_entropy, 0.0);

        let mixed = Document::new("mixed", "I loved and hated it");
        let report = entropy(&mixed, &bing(), true).unwrap();
        assert!(report.entropy > 0.0);
        assert!(report.metric_entropy > 0.0);
        assert_eq!(report.token_count, 5);
    }

    #[test]
    fn test_emotions() {
        let nrc = builtin(BuiltinTable::Nrc).for_language("english");
        let doc = Document::new("e", "I love you. I hate the abandon.");
        let report = emotions(&doc, &nrc, "english", &Executor::Sequential).unwrap();
        assert_eq!(report.sentences.len(), 2);
        assert_eq!(report.sentences[0].counts.joy, 1.0);
        assert_eq!(report.totals.positive, 1.0);
        assert_eq!(report.totals.negative, 2.0);
        assert_eq!(report.totals.fear, 2.0);
    }

    #[test]
    fn test_transform_parsing() {
        assert_eq!("FFT".parse::<Transform>().unwrap(), Transform::Fft);
        assert!("wavelet".parse::<Transform>().is_err());
        assert_eq!(Transform::Dct.to_string(), "dct");
    }
}
