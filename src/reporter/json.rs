//! JSON reporter for machine-readable output

use crate::analyzer::engine::AggregateStats;
use crate::{DocumentReport, Grade};
use serde::Serialize;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    fn to_json<T: Serialize + ?Sized>(&self, value: &T, fallback: &str) -> String {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        json.unwrap_or_else(|_| fallback.to_string())
    }

    /// Report a single document as JSON
    pub fn report(&self, report: &DocumentReport) -> String {
        self.to_json(report, "{}")
    }

    /// Report with summary
    pub fn report_with_summary(&self, reports: &[DocumentReport], stats: &AggregateStats) -> String {
        let output = JsonOutput {
            results: reports,
            summary: JsonSummary {
                documents_analyzed: stats.documents_analyzed,
                average_score: stats.average_score,
                average_grade: stats.average_grade,
                average_readability: stats.average_readability,
                total_checks: stats.total_checks,
                total_errors: stats.total_errors,
            },
        };
        self.to_json(&output, "{}")
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    results: &'a [DocumentReport],
    summary: JsonSummary,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummary {
    documents_analyzed: usize,
    average_score: u8,
    average_grade: Grade,
    average_readability: u8,
    total_checks: usize,
    total_errors: usize,
}
