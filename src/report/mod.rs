//! Human-readable and JSON rendering of test results.
//!
//! Pure formatting: nothing here feeds back into the test. The CLI
//! prints these strings; library users may render summaries however
//! they like.

use crate::analysis::ResultSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

const RULE_WIDTH: usize = 74;

/// A result summary with provenance, as emitted by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// When the run finished.
    pub completed_at: DateTime<Utc>,
    /// Description of the number source.
    pub source: String,
    /// The test outcome.
    pub summary: ResultSummary,
}

impl RunReport {
    /// Wraps a summary, stamping it with the current time.
    pub fn new(source: impl Into<String>, summary: ResultSummary) -> Self {
        Self {
            completed_at: Utc::now(),
            source: source.into(),
            summary,
        }
    }

    /// Serializes the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Renders the header, frequency table and verdict.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Source: {}", self.source);
        let _ = writeln!(out, "Completed: {}", self.completed_at.to_rfc3339());
        out.push_str(&render_summary(&self.summary));
        out
    }
}

/// Renders the frequency table and the verdict.
pub fn render_summary(summary: &ResultSummary) -> String {
    let mut out = String::new();
    let rule = "-".repeat(RULE_WIDTH);

    // Writing to a String cannot fail.
    let _ = writeln!(out, "===== POKER TEST =====");
    let _ = writeln!(out, "Numbers analyzed (n): {}", summary.sample_size);
    let _ = writeln!(
        out,
        "Digits per number:    {} ({})",
        summary.digit_length, summary.extraction
    );
    let _ = writeln!(out, "Significance level:   {}", summary.significance);
    out.push('\n');

    let _ = writeln!(
        out,
        "{:<8} | {:<16} | {:>16} | {:>8} | {:>12} | {:>10}",
        "Hand", "Name", "Probability p_i", "O_i", "E_i", "(O-E)^2/E"
    );
    let _ = writeln!(out, "{}", rule);
    for row in &summary.rows {
        let _ = writeln!(
            out,
            "{:<8} | {:<16} | {:>16.4} | {:>8} | {:>12.4} | {:>10.4}",
            row.category.code(),
            row.category.name(),
            row.probability,
            row.observed,
            row.expected,
            row.contribution
        );
    }
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "chi-squared statistic = {:.4}", summary.chi_squared);
    let _ = writeln!(
        out,
        "chi-squared critical  = {:.4}  (df = {})",
        summary.critical_value, summary.degrees_of_freedom
    );
    out.push('\n');
    out.push_str(&render_verdict(summary));
    out
}

/// Renders the two-line conclusion.
pub fn render_verdict(summary: &ResultSummary) -> String {
    let symbol = summary.criterion.symbol();
    if summary.passed {
        format!(
            "Conclusion: statistic {} critical value, the hypothesis is NOT rejected.\n\
             The numbers PASS the poker test at the given significance level.\n",
            symbol
        )
    } else {
        format!(
            "Conclusion: statistic not {} critical value, the hypothesis is rejected.\n\
             The numbers FAIL the poker test at the given significance level.\n",
            symbol
        )
    }
}

/// Renders one line per input value with its digits and hand.
pub fn render_records(summary: &ResultSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>6} | {:<20} | {:<6} | {}", "#", "Value", "Digits", "Hand");
    let _ = writeln!(out, "{}", "-".repeat(50));
    for (index, record) in summary.records.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>6} | {:<20} | {:<6} | {}",
            index + 1,
            record.value,
            record.digits,
            record.category.code()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::run_test;
    use crate::source::CLASS_SAMPLE;

    #[test]
    fn test_summary_lists_every_category() {
        let summary = run_test(&CLASS_SAMPLE, 5).unwrap();
        let text = render_summary(&summary);

        for code in ["TD", "1P", "2P", "T ", "TP", "P ", "Q "] {
            assert!(text.contains(code), "missing {}", code);
        }
        assert!(text.contains("Numbers analyzed (n): 30"));
        assert!(text.contains("chi-squared statistic = 15.4806"));
        assert!(text.contains("(df = 6)"));
        assert!(text.contains("FAIL"));
    }

    #[test]
    fn test_passing_verdict() {
        let summary = run_test(&CLASS_SAMPLE, 3).unwrap();
        let verdict = render_verdict(&summary);
        assert!(verdict.contains("PASS"));
        assert!(verdict.contains("statistic < critical value"));
    }

    #[test]
    fn test_records_table() {
        let summary = run_test(&CLASS_SAMPLE[..2], 5).unwrap();
        let text = render_records(&summary);
        assert!(text.contains("06141"));
        assert!(text.contains("72484"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_json_report() {
        let summary = run_test(&CLASS_SAMPLE, 4).unwrap();
        let report = RunReport::new("literal (30 values)", summary.clone());
        let json = report.to_json().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["summary"]["sample_size"], 30);
        assert_eq!(value["summary"]["digit_length"], 4);
        assert_eq!(value["summary"]["rows"][0]["category"], "all-distinct");
        assert_eq!(value["summary"]["passed"], false);
        assert_eq!(value["source"], "literal (30 values)");

        let parsed: RunReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.summary.records.len(), 30);
        assert_eq!(parsed.summary.digit_length, summary.digit_length);
        assert_eq!(parsed.completed_at, report.completed_at);
    }

    #[test]
    fn test_text_report_header() {
        let summary = run_test(&CLASS_SAMPLE, 3).unwrap();
        let text = RunReport::new("literal (30 values)", summary).render_text();
        assert!(text.starts_with("Source: literal (30 values)\n"));
    }
}
