//! Output reporters for plotarc results
//!
//! Supports two output formats:
//! - `text` - Terminal output with colors and a sparkline for trajectories
//! - `json` - Machine-readable JSON

mod json;
mod text;

use crate::models::Report;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render a report in the specified format
pub fn render(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(report),
        OutputFormat::Json => json::render(report),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{SentenceScore, SentimentReport, Summary, TrajectoryReport};

    pub(crate) fn sentiment_report() -> Report {
        let values = [0.75, -0.5];
        Report::Sentiment(SentimentReport {
            source: "story.txt".into(),
            method: "syuzhet".into(),
            summary: Summary::from_values(&values),
            sentences: vec![
                SentenceScore {
                    index: 1,
                    text: "I love it.".into(),
                    value: values[0],
                },
                SentenceScore {
                    index: 2,
                    text: "Then it broke.".into(),
                    value: values[1],
                },
            ],
            narrative_time: None,
        })
    }

    pub(crate) fn trajectory_report() -> Report {
        Report::Trajectory(TrajectoryReport {
            source: "story.txt".into(),
            method: "syuzhet".into(),
            transform: "dct".into(),
            low_pass_size: 5,
            out_len: 5,
            padding_factor: None,
            scaling: "range".into(),
            sentence_count: 12,
            values: vec![-1.0, -0.5, 0.0, 0.5, 1.0],
        })
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("txt".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        let err = "sarif".parse::<OutputFormat>().unwrap_err().to_string();
        assert!(err.contains("Valid formats: text, json"));
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_render_dispatch() {
        let report = sentiment_report();
        let json = render(&report, OutputFormat::Json).unwrap();
        assert!(json.trim_start().starts_with('{'));
        let text = render(&report, OutputFormat::Text).unwrap();
        assert!(text.contains("syuzhet"));
    }
}
