//! Report models for plotarc
//!
//! Every command produces one of these. Reporters render them as terminal
//! text or JSON; the JSON field names are the stable machine interface.

use plotarc_fast::entropy::MixedMessages;
use plotarc_fast::lexicon::EmotionCounts;
use plotarc_fast::rescale::NarrativeTime;
use serde::Serialize;

/// Score of one sentence
#[derive(Debug, Clone, Serialize)]
pub struct SentenceScore {
    /// 1-based position in the document
    pub index: usize,
    pub text: String,
    pub value: f64,
}

/// Summary over a value sequence
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Summary {
    pub count: usize,
    pub total: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl Summary {
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Summary::default();
        }
        let total: f64 = values.iter().sum();
        Summary {
            count: values.len(),
            total,
            mean: total / values.len() as f64,
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SentimentReport {
    pub source: String,
    pub method: String,
    pub summary: Summary,
    pub sentences: Vec<SentenceScore>,
    /// Narrative-time view (x positions, divide-by-max, z-scores)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative_time: Option<NarrativeTime>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrajectoryReport {
    pub source: String,
    pub method: String,
    /// "dct" or "fft"
    pub transform: String,
    pub low_pass_size: usize,
    pub out_len: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_factor: Option<usize>,
    /// "none", "range" or "zscore"
    pub scaling: String,
    pub sentence_count: usize,
    pub values: Vec<f64>,
}

/// One percentage bin
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Bin {
    /// 1-based bin number
    pub bin: usize,
    pub mean: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BinsReport {
    pub source: String,
    pub method: String,
    pub sentence_count: usize,
    pub bins: Vec<Bin>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntropyReport {
    pub source: String,
    pub method: String,
    pub token_count: usize,
    pub remove_neutral: bool,
    pub entropy: f64,
    pub metric_entropy: f64,
}

impl EntropyReport {
    pub fn new(
        source: String,
        method: String,
        token_count: usize,
        remove_neutral: bool,
        result: MixedMessages,
    ) -> Self {
        Self {
            source,
            method,
            token_count,
            remove_neutral,
            entropy: result.entropy,
            metric_entropy: result.metric_entropy,
        }
    }
}

/// Emotion totals of one sentence
#[derive(Debug, Clone, Serialize)]
pub struct SentenceEmotions {
    pub index: usize,
    #[serde(flatten)]
    pub counts: EmotionCounts,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmotionReport {
    pub source: String,
    pub language: String,
    pub totals: EmotionCounts,
    pub sentences: Vec<SentenceEmotions>,
}

/// Anything a command can print
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Report {
    Sentiment(SentimentReport),
    Trajectory(TrajectoryReport),
    Bins(BinsReport),
    Entropy(EntropyReport),
    Emotions(EmotionReport),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        let s = Summary::from_values(&[1.0, -2.0, 4.0]);
        assert_eq!(s.count, 3);
        assert_eq!(s.total, 3.0);
        assert_eq!(s.mean, 1.0);
        assert_eq!(s.min, -2.0);
        assert_eq!(s.max, 4.0);
    }

    #[test]
    fn test_summary_empty() {
        let s = Summary::from_values(&[]);
        assert_eq!(s.count, 0);
        assert_eq!(s.mean, 0.0);
    }

    #[test]
    fn test_report_is_untagged() {
        let report = Report::Bins(BinsReport {
            source: "novel.txt".into(),
            method: "bing".into(),
            sentence_count: 4,
            bins: vec![Bin { bin: 1, mean: 0.5 }, Bin { bin: 2, mean: -1.0 }],
        });
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["method"], "bing");
        assert_eq!(json["bins"][1]["bin"], 2);
        assert!(json.get("Bins").is_none());
    }
}
