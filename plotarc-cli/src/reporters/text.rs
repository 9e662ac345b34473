//! Text (terminal) reporter with colors and formatting

use crate::models::{
    BinsReport, EmotionReport, EntropyReport, Report, SentimentReport, TrajectoryReport,
};
use anyhow::Result;
use plotarc_fast::lexicon::Category;

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const SPARKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Longest sentence excerpt shown in the per-sentence table
const EXCERPT_CHARS: usize = 60;

/// Value colors (ANSI escape codes)
fn value_color(value: f64) -> &'static str {
    if value > 0.0 {
        "\x1b[32m" // Green
    } else if value < 0.0 {
        "\x1b[31m" // Red
    } else {
        "\x1b[90m" // Gray
    }
}

/// One block character per value, scaled between the sequence min and max.
pub(crate) fn sparkline(values: &[f64]) -> String {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    values
        .iter()
        .map(|&v| {
            if span <= 0.0 || !span.is_finite() {
                SPARKS[SPARKS.len() / 2]
            } else {
                let idx = ((v - min) / span * (SPARKS.len() - 1) as f64).round() as usize;
                SPARKS[idx.min(SPARKS.len() - 1)]
            }
        })
        .collect()
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= EXCERPT_CHARS {
        text.to_string()
    } else {
        let cut: String = text.chars().take(EXCERPT_CHARS - 1).collect();
        format!("{cut}…")
    }
}

fn header(out: &mut String, title: &str, source: &str) {
    out.push_str(&format!("\n{BOLD}{title}{RESET}  {DIM}{source}{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
}

/// Render report as formatted terminal output
pub fn render(report: &Report) -> Result<String> {
    let mut out = String::new();
    match report {
        Report::Sentiment(r) => render_sentiment(&mut out, r),
        Report::Trajectory(r) => render_trajectory(&mut out, r),
        Report::Bins(r) => render_bins(&mut out, r),
        Report::Entropy(r) => render_entropy(&mut out, r),
        Report::Emotions(r) => render_emotions(&mut out, r),
    }
    Ok(out)
}

fn render_sentiment(out: &mut String, r: &SentimentReport) {
    header(out, "Sentiment", &r.source);
    let s = &r.summary;
    out.push_str(&format!(
        "Method: {BOLD}{}{RESET}  Sentences: {}  Total: {:.3}  Mean: {:.3}  Range: [{:.3}, {:.3}]\n\n",
        r.method, s.count, s.total, s.mean, s.min, s.max
    ));

    for sentence in &r.sentences {
        let color = value_color(sentence.value);
        out.push_str(&format!(
            "{DIM}{:>5}{RESET}  {color}{:>8.3}{RESET}  {}\n",
            sentence.index,
            sentence.value,
            excerpt(&sentence.text)
        ));
    }

    if let Some(nt) = &r.narrative_time {
        out.push_str(&format!("\n{BOLD}Narrative time{RESET}\n"));
        out.push_str(&format!("  scaled  {}\n", sparkline(&nt.y)));
        out.push_str(&format!("  z-score {}\n", sparkline(&nt.z)));
    }
}

fn render_trajectory(out: &mut String, r: &TrajectoryReport) {
    header(out, "Trajectory", &r.source);
    out.push_str(&format!(
        "Method: {BOLD}{}{RESET}  Transform: {}  Low-pass: {}  Points: {}",
        r.method, r.transform, r.low_pass_size, r.out_len
    ));
    if let Some(pf) = r.padding_factor {
        out.push_str(&format!("  Padding: {pf}"));
    }
    out.push_str(&format!(
        "  Scaling: {}  Sentences: {}\n\n",
        r.scaling, r.sentence_count
    ));

    out.push_str(&format!("  {}\n", sparkline(&r.values)));
    let width = r.values.len().saturating_sub(2).max(4);
    out.push_str(&format!("  {DIM}0%{:>width$}{RESET}\n\n", "100%"));

    // Ten evenly spaced readings are enough to see the shape as numbers
    let step = (r.values.len() / 10).max(1);
    for (i, value) in r.values.iter().enumerate().step_by(step) {
        let pct = if r.values.len() > 1 {
            100.0 * i as f64 / (r.values.len() - 1) as f64
        } else {
            0.0
        };
        let color = value_color(*value);
        out.push_str(&format!("  {:>5.1}%  {color}{:>8.3}{RESET}\n", pct, value));
    }
}

fn render_bins(out: &mut String, r: &BinsReport) {
    header(out, "Percentage bins", &r.source);
    out.push_str(&format!(
        "Method: {BOLD}{}{RESET}  Bins: {}  Sentences: {}\n\n",
        r.method,
        r.bins.len(),
        r.sentence_count
    ));
    let means: Vec<f64> = r.bins.iter().map(|b| b.mean).collect();
    out.push_str(&format!("  {}\n\n", sparkline(&means)));
    for bin in &r.bins {
        let color = value_color(bin.mean);
        out.push_str(&format!(
            "  {DIM}{:>4}{RESET}  {color}{:>8.3}{RESET}\n",
            bin.bin, bin.mean
        ));
    }
}

fn render_entropy(out: &mut String, r: &EntropyReport) {
    header(out, "Mixed messages", &r.source);
    out.push_str(&format!(
        "Method: {BOLD}{}{RESET}  Tokens: {}  Neutral tokens: {}\n\n",
        r.method,
        r.token_count,
        if r.remove_neutral { "removed" } else { "kept" }
    ));
    out.push_str(&format!("  Entropy:        {BOLD}{:.4}{RESET}\n", r.entropy));
    out.push_str(&format!("  Metric entropy: {BOLD}{:.6}{RESET}\n", r.metric_entropy));
}

fn render_emotions(out: &mut String, r: &EmotionReport) {
    header(out, "Emotions", &r.source);
    out.push_str(&format!(
        "Language: {BOLD}{}{RESET}  Sentences: {}\n\n",
        r.language,
        r.sentences.len()
    ));

    let totals = r.totals.as_array();
    let peak = totals.iter().copied().fold(0.0_f64, f64::max);
    for (category, total) in Category::EMOTIONS.iter().zip(totals) {
        let width = if peak > 0.0 {
            (total / peak * 30.0).round() as usize
        } else {
            0
        };
        out.push_str(&format!(
            "  {:<13} {:>7.1}  {}\n",
            category.as_str(),
            total,
            "█".repeat(width)
        ));
    }
    out.push_str(&format!(
        "\n  {DIM}polarity (positive - negative):{RESET} {:.1}\n",
        r.totals.polarity()
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Bin, SentenceEmotions};
    use crate::reporters::tests::{sentiment_report, trajectory_report};
    use plotarc_fast::lexicon::EmotionCounts;

    #[test]
    fn test_sparkline_spans_blocks() {
        let line = sparkline(&[0.0, 0.5, 1.0]);
        assert_eq!(line.chars().count(), 3);
        assert_eq!(line.chars().next(), Some('▁'));
        assert_eq!(line.chars().last(), Some('█'));
    }

    #[test]
    fn test_sparkline_flat_and_empty() {
        assert_eq!(sparkline(&[2.0, 2.0]), "▅▅");
        assert_eq!(sparkline(&[]), "");
    }

    #[test]
    fn test_excerpt_truncates() {
        let long = "word ".repeat(40);
        let cut = excerpt(&long);
        assert_eq!(cut.chars().count(), EXCERPT_CHARS);
        assert!(cut.ends_with('…'));
        assert_eq!(excerpt("short"), "short");
    }

    #[test]
    fn test_sentiment_text() {
        let text = render(&sentiment_report()).unwrap();
        assert!(text.contains("Sentiment"));
        assert!(text.contains("I love it."));
        assert!(text.contains("0.750"));
    }

    #[test]
    fn test_trajectory_text() {
        let text = render(&trajectory_report()).unwrap();
        assert!(text.contains("Transform: dct"));
        assert!(text.contains("▁▃▅▆█"));
        assert!(text.contains("100.0%"));
    }

    #[test]
    fn test_bins_entropy_emotions_text() {
        let bins = Report::Bins(BinsReport {
            source: "s".into(),
            method: "bing".into(),
            sentence_count: 4,
            bins: vec![Bin { bin: 1, mean: 1.0 }, Bin { bin: 2, mean: -1.0 }],
        });
        assert!(render(&bins).unwrap().contains("Bins: 2"));

        let entropy = Report::Entropy(EntropyReport {
            source: "s".into(),
            method: "bing".into(),
            token_count: 5,
            remove_neutral: true,
            entropy: 1.0,
            metric_entropy: 0.2,
        });
        let text = render(&entropy).unwrap();
        assert!(text.contains("removed"));
        assert!(text.contains("0.200000"));

        let counts = EmotionCounts {
            joy: 2.0,
            positive: 3.0,
            negative: 1.0,
            ..Default::default()
        };
        let emotions = Report::Emotions(EmotionReport {
            source: "s".into(),
            language: "english".into(),
            totals: counts,
            sentences: vec![SentenceEmotions { index: 1, counts }],
        });
        let text = render(&emotions).unwrap();
        assert!(text.contains("anticipation"));
        assert!(text.contains("2.0"));
    }
}
