//! Analysis engine - orchestrates all rules

use crate::config::{CheckSeverity, Config};
use crate::document::Document;
use crate::{AnalysisInput, AnalysisResult, Check, DocumentReport, Grade, ScoreBreakdown};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::rules::{
    AnalysisContext, DescriptionRule, KeywordRule, LinkStructureRule, ReadabilityRule,
    ScoringRule, TitleRule,
};

/// Pure SEO scorer: folds an ordered list of rules over one piece of content
pub struct SeoAnalyzer {
    rules: Vec<Box<dyn ScoringRule + Send + Sync>>,
}

impl SeoAnalyzer {
    /// Create an analyzer with the standard rule set, in evaluation order
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(TitleRule::new()),
                Box::new(DescriptionRule::new()),
                Box::new(KeywordRule::new()),
                Box::new(ReadabilityRule::new()),
                Box::new(LinkStructureRule::new()),
            ],
        }
    }

    /// Score the input against the content
    pub fn analyze(&self, input: &AnalysisInput, content: &str) -> AnalysisResult {
        self.analyze_detailed(input, content).0
    }

    /// Score the input and also return the raw points per category
    pub fn analyze_detailed(
        &self,
        input: &AnalysisInput,
        content: &str,
    ) -> (AnalysisResult, ScoreBreakdown) {
        let ctx = AnalysisContext::new(input, content);

        let (breakdown, mut checks) = self.rules.iter().fold(
            (ScoreBreakdown::default(), Vec::new()),
            |(mut breakdown, mut checks), rule| {
                let outcome = rule.evaluate(&ctx);
                tracing::debug!(
                    target: "seoscore::rules",
                    rule = rule.name(),
                    points = outcome.points,
                    max_points = rule.max_points(),
                    checks = outcome.checks.len(),
                    "rule evaluated"
                );
                breakdown.add(rule.category(), outcome.points);
                checks.extend(outcome.checks);
                (breakdown, checks)
            },
        );

        sort_checks(&mut checks);

        let result = AnalysisResult {
            score: breakdown.total(),
            readability_score: ctx.readability_score,
            checks,
        };
        (result, breakdown)
    }
}

impl Default for SeoAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Stable sort: errors, then warnings, then good checks
pub fn sort_checks(checks: &mut [Check]) {
    checks.sort_by_key(|c| c.status.rank());
}

/// Document-level engine: loading, config application and batches
pub struct AnalysisEngine {
    analyzer: SeoAnalyzer,
    overrides: FieldOverrides,
}

/// Field values that replace whatever a loaded document carries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldOverrides {
    pub title: Option<String>,
    pub description: Option<String>,
    pub focus_keyphrase: Option<String>,
}

impl FieldOverrides {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.focus_keyphrase.is_none()
    }

    pub fn apply(&self, document: Document) -> Document {
        document.with_overrides(
            self.title.as_deref(),
            self.description.as_deref(),
            self.focus_keyphrase.as_deref(),
        )
    }
}

impl AnalysisEngine {
    /// Create a new analysis engine
    pub fn new() -> Self {
        Self {
            analyzer: SeoAnalyzer::new(),
            overrides: FieldOverrides::default(),
        }
    }

    /// Replace document fields on every analysis (CLI `--title` and friends)
    pub fn with_field_overrides(mut self, overrides: FieldOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Apply config check overrides to the reported checks. Scores are untouched.
    fn apply_config_to_checks(
        &self,
        checks: Vec<Check>,
        config: Option<&Config>,
        path: &Path,
    ) -> Vec<Check> {
        let Some(config) = config else {
            return checks;
        };

        let effective = config.effective_for_file(path);
        if effective.checks.is_empty() {
            return checks;
        }

        let mut out = Vec::with_capacity(checks.len());
        for mut check in checks {
            match effective.checks.get(check.id.as_str()) {
                Some(CheckSeverity::Off) => continue,
                Some(severity) => {
                    if let Some(status) = severity.to_status() {
                        check.status = status;
                    }
                    out.push(check);
                }
                None => out.push(check),
            }
        }
        sort_checks(&mut out);
        out
    }

    /// Analyze a document file and return the report
    pub fn analyze(&self, path: &Path, config: Option<&Config>) -> Result<DocumentReport> {
        let document = Document::load(path)
            .with_context(|| format!("Failed to load document: {}", path.display()))?;
        let document = self.overrides.apply(document);
        Ok(self.analyze_document(&document, path, config))
    }

    /// Analyze an in-memory document (stdin, CLI fields). `path` is used for
    /// config overrides and reporting only.
    pub fn analyze_document(
        &self,
        document: &Document,
        path: &Path,
        config: Option<&Config>,
    ) -> DocumentReport {
        let (mut result, breakdown) = self
            .analyzer
            .analyze_detailed(&document.fields, &document.content);
        tracing::debug!(
            path = %path.display(),
            score = result.score,
            readability = result.readability_score,
            "document analyzed"
        );
        result.checks = self.apply_config_to_checks(result.checks, config, path);

        DocumentReport {
            file_path: path.to_path_buf(),
            grade: Grade::from_score(result.score),
            result,
            breakdown,
        }
    }

    /// Analyze multiple documents sequentially
    pub fn analyze_many(
        &self,
        paths: &[&Path],
        config: Option<&Config>,
    ) -> Vec<Result<DocumentReport>> {
        paths.iter().map(|p| self.analyze(p, config)).collect()
    }

    /// Analyze multiple documents in parallel using rayon
    pub fn analyze_parallel(
        &self,
        paths: &[PathBuf],
        config: Option<&Config>,
    ) -> Vec<Result<DocumentReport>> {
        use rayon::prelude::*;

        paths.par_iter().map(|p| self.analyze(p, config)).collect()
    }

    /// Get aggregate stats from multiple reports
    pub fn aggregate_stats(reports: &[DocumentReport]) -> AggregateStats {
        if reports.is_empty() {
            return AggregateStats::default();
        }

        let count = reports.len() as u32;
        let total_score: u32 = reports.iter().map(|r| r.result.score as u32).sum();
        let total_readability: u32 = reports
            .iter()
            .map(|r| r.result.readability_score as u32)
            .sum();
        let average_score = (total_score / count) as u8;

        AggregateStats {
            documents_analyzed: reports.len(),
            average_score,
            average_grade: Grade::from_score(average_score),
            average_readability: (total_readability / count) as u8,
            total_checks: reports.iter().map(|r| r.result.checks.len()).sum(),
            total_errors: reports
                .iter()
                .flat_map(|r| r.result.checks.iter())
                .filter(|c| c.status == crate::CheckStatus::Error)
                .count(),
        }
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate statistics from multiple document analyses
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateStats {
    /// Number of documents analyzed
    pub documents_analyzed: usize,
    /// Average score across all documents
    pub average_score: u8,
    pub average_grade: Grade,
    /// Average Flesch Reading Ease across all documents
    pub average_readability: u8,
    /// Total number of checks reported
    pub total_checks: usize,
    /// Checks with error status
    pub total_errors: usize,
}

impl Default for AggregateStats {
    fn default() -> Self {
        Self {
            documents_analyzed: 0,
            average_score: 0,
            average_grade: Grade::F,
            average_readability: 0,
            total_checks: 0,
            total_errors: 0,
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    /// Fragments that look vaguely like page markup
    fn arbitrary_markup() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop::sample::select(vec![
                "<p>",
                "</p>",
                "<a href=\"/x\">",
                "</a>",
                "<",
                ">",
                "kitchen",
                "cabinets",
                " ",
                "\n",
                ".",
                "!",
                "?",
                "Melbourne",
                "joinery",
                "(",
                ")",
                "*",
            ]),
            0..60,
        )
        .prop_map(|parts| parts.join(""))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn scores_stay_in_bounds(
            title in ".{0,90}",
            description in ".{0,200}",
            keyphrase in ".{0,20}",
            content in arbitrary_markup(),
        ) {
            let input = AnalysisInput::new(&title, &description, &keyphrase);
            let result = SeoAnalyzer::new().analyze(&input, &content);
            prop_assert!(result.score <= 100);
            prop_assert!(result.readability_score <= 100);
            prop_assert!(!result.checks.is_empty());
        }

        #[test]
        fn checks_are_ordered_by_status(
            title in ".{0,90}",
            keyphrase in "[a-z()*+?. ]{0,12}",
            content in arbitrary_markup(),
        ) {
            let input = AnalysisInput::new(&title, "", &keyphrase);
            let result = SeoAnalyzer::new().analyze(&input, &content);
            for pair in result.checks.windows(2) {
                prop_assert!(pair[0].status.rank() <= pair[1].status.rank());
            }
        }

        #[test]
        fn analysis_is_idempotent(
            title in ".{0,70}",
            keyphrase in ".{0,15}",
            content in ".{0,400}",
        ) {
            let input = AnalysisInput::new(&title, &title, &keyphrase);
            let analyzer = SeoAnalyzer::new();
            prop_assert_eq!(
                analyzer.analyze(&input, &content),
                analyzer.analyze(&input, &content)
            );
        }
    }
}
