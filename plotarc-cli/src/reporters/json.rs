//! JSON reporter
//!
//! Outputs the report as pretty-printed JSON for piping to jq or loading
//! into a plotting tool.

use crate::models::Report;
use anyhow::Result;

/// Render report as JSON
pub fn render(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::{sentiment_report, trajectory_report};

    #[test]
    fn test_json_render_valid() {
        let json_str = render(&sentiment_report()).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["method"], "syuzhet");
        assert_eq!(parsed["summary"]["count"], 2);
        assert_eq!(parsed["sentences"][1]["index"], 2);
        assert!(parsed.get("narrative_time").is_none());
    }

    #[test]
    fn test_json_trajectory_values() {
        let json_str = render(&trajectory_report()).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["values"].as_array().expect("values array").len(), 5);
        assert_eq!(parsed["transform"], "dct");
        assert!(parsed.get("padding_factor").is_none());
    }
}
