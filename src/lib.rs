//! seoscore: heuristic SEO scoring for website content
//!
//! This library scores a page's SEO title, meta description and body
//! content against a fixed set of rules, producing a 0-100 score, a
//! readability score and a list of actionable checks for content editors.

pub mod analyzer;
pub mod config;
pub mod document;
pub mod reporter;
pub mod watcher;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// SEO fields of the record being analyzed. Every field is optional; an
/// absent field is scored exactly like an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisInput {
    /// Candidate SEO title
    #[serde(default)]
    pub seo_title: Option<String>,
    /// Candidate meta description
    #[serde(default)]
    pub seo_description: Option<String>,
    /// Target keyword or phrase the content is optimized for
    #[serde(default)]
    pub focus_keyphrase: Option<String>,
}

impl AnalysisInput {
    pub fn new(title: &str, description: &str, focus_keyphrase: &str) -> Self {
        Self {
            seo_title: Some(title.to_string()),
            seo_description: Some(description.to_string()),
            focus_keyphrase: Some(focus_keyphrase.to_string()),
        }
    }

    pub fn title(&self) -> &str {
        self.seo_title.as_deref().unwrap_or("")
    }

    pub fn description(&self) -> &str {
        self.seo_description.as_deref().unwrap_or("")
    }

    pub fn focus_keyphrase(&self) -> &str {
        self.focus_keyphrase.as_deref().unwrap_or("")
    }
}

/// The result of analyzing one piece of content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Aggregate SEO score (0-100)
    pub score: u8,
    /// Flesch Reading Ease estimate (0-100)
    pub readability_score: u8,
    /// Findings, errors first, then warnings, then passing checks
    pub checks: Vec<Check>,
}

/// A single diagnostic finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Check {
    /// Rule outcome that produced this check
    pub id: CheckId,
    /// Short human label
    pub title: String,
    /// Explanation or remediation hint
    pub description: String,
    pub status: CheckStatus,
    pub priority: Priority,
    /// Measured quantity (character count, density, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<CheckValue>,
}

impl Check {
    pub fn new(
        id: CheckId,
        status: CheckStatus,
        priority: Priority,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            status,
            priority,
            value: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<CheckValue>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// Measured value attached to a check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CheckValue {
    Number(i64),
    Text(String),
}

impl From<usize> for CheckValue {
    fn from(n: usize) -> Self {
        CheckValue::Number(n as i64)
    }
}

impl From<u8> for CheckValue {
    fn from(n: u8) -> Self {
        CheckValue::Number(n as i64)
    }
}

impl From<String> for CheckValue {
    fn from(s: String) -> Self {
        CheckValue::Text(s)
    }
}

impl std::fmt::Display for CheckValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckValue::Number(n) => write!(f, "{}", n),
            CheckValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Severity of a check. Declaration order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Error,
    Warning,
    Good,
}

impl CheckStatus {
    /// Sort rank: error(0) < warning(1) < good(2)
    pub fn rank(self) -> u8 {
        match self {
            CheckStatus::Error => 0,
            CheckStatus::Warning => 1,
            CheckStatus::Good => 2,
        }
    }
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Error => write!(f, "error"),
            CheckStatus::Warning => write!(f, "warning"),
            CheckStatus::Good => write!(f, "good"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

/// Stable identifiers for every rule outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckId {
    TitleMissing,
    TitleLength,
    TitleLengthOk,
    TitleLengthBad,
    /// Keyphrase opens the title
    TitleFocus,
    /// Keyphrase in the title, but not at the start
    TitleFocusPresent,
    TitleFocusMissing,
    DescMissing,
    DescLength,
    DescLengthOk,
    DescLengthBad,
    DescFocus,
    DescFocusMissing,
    KwMissingContent,
    KwDensity,
    KwDensityAlt,
    KwFirstPara,
    KwFirstParaMissing,
    ReadabilityIssue,
    LinkStructure,
    LinkStructureLow,
}

impl CheckId {
    pub const ALL: [CheckId; 21] = [
        CheckId::TitleMissing,
        CheckId::TitleLength,
        CheckId::TitleLengthOk,
        CheckId::TitleLengthBad,
        CheckId::TitleFocus,
        CheckId::TitleFocusPresent,
        CheckId::TitleFocusMissing,
        CheckId::DescMissing,
        CheckId::DescLength,
        CheckId::DescLengthOk,
        CheckId::DescLengthBad,
        CheckId::DescFocus,
        CheckId::DescFocusMissing,
        CheckId::KwMissingContent,
        CheckId::KwDensity,
        CheckId::KwDensityAlt,
        CheckId::KwFirstPara,
        CheckId::KwFirstParaMissing,
        CheckId::ReadabilityIssue,
        CheckId::LinkStructure,
        CheckId::LinkStructureLow,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CheckId::TitleMissing => "title_missing",
            CheckId::TitleLength => "title_length",
            CheckId::TitleLengthOk => "title_length_ok",
            CheckId::TitleLengthBad => "title_length_bad",
            CheckId::TitleFocus => "title_focus",
            CheckId::TitleFocusPresent => "title_focus_present",
            CheckId::TitleFocusMissing => "title_focus_missing",
            CheckId::DescMissing => "desc_missing",
            CheckId::DescLength => "desc_length",
            CheckId::DescLengthOk => "desc_length_ok",
            CheckId::DescLengthBad => "desc_length_bad",
            CheckId::DescFocus => "desc_focus",
            CheckId::DescFocusMissing => "desc_focus_missing",
            CheckId::KwMissingContent => "kw_missing_content",
            CheckId::KwDensity => "kw_density",
            CheckId::KwDensityAlt => "kw_density_alt",
            CheckId::KwFirstPara => "kw_first_para",
            CheckId::KwFirstParaMissing => "kw_first_para_missing",
            CheckId::ReadabilityIssue => "readability_issue",
            CheckId::LinkStructure => "link_structure",
            CheckId::LinkStructureLow => "link_structure_low",
        }
    }

    /// Scoring category this check reports on
    pub fn category(self) -> Category {
        use CheckId::*;
        match self {
            TitleMissing | TitleLength | TitleLengthOk | TitleLengthBad | TitleFocus
            | TitleFocusPresent | TitleFocusMissing => Category::Title,
            DescMissing | DescLength | DescLengthOk | DescLengthBad | DescFocus
            | DescFocusMissing => Category::Description,
            KwMissingContent | KwDensity | KwDensityAlt | KwFirstPara | KwFirstParaMissing => {
                Category::Keyword
            }
            ReadabilityIssue => Category::Readability,
            LinkStructure | LinkStructureLow => Category::Links,
        }
    }
}

impl std::fmt::Display for CheckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CheckId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CheckId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("unknown check id: {}", s))
    }
}

/// Scoring categories, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Title,
    Description,
    Keyword,
    Readability,
    Links,
}

impl Category {
    /// Nominal point budget of the category
    pub fn max_points(self) -> u8 {
        match self {
            Category::Title => 25,
            Category::Description => 20,
            Category::Keyword => 20,
            Category::Readability => 15,
            Category::Links => 10,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Title => write!(f, "SEO Title"),
            Category::Description => write!(f, "Meta Description"),
            Category::Keyword => write!(f, "Keyphrase Usage"),
            Category::Readability => write!(f, "Readability"),
            Category::Links => write!(f, "Link Structure"),
        }
    }
}

/// Raw points awarded per category
///
/// A category can exceed its nominal budget (title keyphrase bonuses stack
/// to 30); only the total is clamped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub title: u8,
    pub description: u8,
    pub keyword: u8,
    pub readability: u8,
    pub links: u8,
}

impl ScoreBreakdown {
    pub fn get(&self, category: Category) -> u8 {
        match category {
            Category::Title => self.title,
            Category::Description => self.description,
            Category::Keyword => self.keyword,
            Category::Readability => self.readability,
            Category::Links => self.links,
        }
    }

    pub fn add(&mut self, category: Category, points: u8) {
        let slot = match category {
            Category::Title => &mut self.title,
            Category::Description => &mut self.description,
            Category::Keyword => &mut self.keyword,
            Category::Readability => &mut self.readability,
            Category::Links => &mut self.links,
        };
        *slot = slot.saturating_add(points);
    }

    /// Sum of all categories, clamped to 100
    pub fn total(&self) -> u8 {
        let sum = self.title as u16
            + self.description as u16
            + self.keyword as u16
            + self.readability as u16
            + self.links as u16;
        sum.min(100) as u8
    }

    /// Categories with their raw points, in evaluation order
    pub fn entries(&self) -> [(Category, u8); 5] {
        [
            (Category::Title, self.title),
            (Category::Description, self.description),
            (Category::Keyword, self.keyword),
            (Category::Readability, self.readability),
            (Category::Links, self.links),
        ]
    }
}

/// Analysis of one document, as reported by the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReport {
    /// Path of the analyzed document (`-` for stdin)
    pub file_path: PathBuf,
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub breakdown: ScoreBreakdown,
    pub grade: Grade,
}

/// Letter grade for a final score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=100 => Grade::A,
            80..=89 => Grade::B,
            70..=79 => Grade::C,
            60..=69 => Grade::D,
            _ => Grade::F,
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grade::A => write!(f, "A"),
            Grade::B => write!(f, "B"),
            Grade::C => write!(f, "C"),
            Grade::D => write!(f, "D"),
            Grade::F => write!(f, "F"),
        }
    }
}

/// Public API: score SEO fields against a body of content.
///
/// * `input` - title, description and focus keyphrase (any may be absent)
/// * `content` - body text, may contain markup
///
/// Pure and infallible: degenerate input lowers the score instead of erroring.
pub fn analyze(input: &AnalysisInput, content: &str) -> AnalysisResult {
    analyzer::SeoAnalyzer::new().analyze(input, content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_id_round_trips_through_str() {
        for id in CheckId::ALL {
            assert_eq!(id.as_str().parse::<CheckId>().unwrap(), id);
        }
        assert!("nope".parse::<CheckId>().is_err());
    }

    #[test]
    fn test_check_id_serializes_snake_case() {
        let json = serde_json::to_string(&CheckId::KwFirstParaMissing).unwrap();
        assert_eq!(json, "\"kw_first_para_missing\"");
        let json = serde_json::to_string(&CheckId::TitleFocusPresent).unwrap();
        assert_eq!(json, "\"title_focus_present\"");
    }

    #[test]
    fn test_status_order() {
        assert!(CheckStatus::Error < CheckStatus::Warning);
        assert!(CheckStatus::Warning < CheckStatus::Good);
        assert_eq!(CheckStatus::Good.rank(), 2);
    }

    #[test]
    fn test_check_value_untagged() {
        let n = serde_json::to_value(CheckValue::from(55usize)).unwrap();
        assert_eq!(n, serde_json::json!(55));
        let s = serde_json::to_value(CheckValue::from("1.00%".to_string())).unwrap();
        assert_eq!(s, serde_json::json!("1.00%"));
    }

    #[test]
    fn test_input_accessors_default_to_empty() {
        let input = AnalysisInput::default();
        assert_eq!(input.title(), "");
        assert_eq!(input.description(), "");
        assert_eq!(input.focus_keyphrase(), "");
    }

    #[test]
    fn test_input_deserializes_camel_case() {
        let input: AnalysisInput =
            serde_json::from_str(r#"{"seoTitle":"T","focusKeyphrase":"k"}"#).unwrap();
        assert_eq!(input.title(), "T");
        assert_eq!(input.description(), "");
        assert_eq!(input.focus_keyphrase(), "k");
    }

    #[test]
    fn test_grade_from_score() {
        assert_eq!(Grade::from_score(100), Grade::A);
        assert_eq!(Grade::from_score(90), Grade::A);
        assert_eq!(Grade::from_score(89), Grade::B);
        assert_eq!(Grade::from_score(70), Grade::C);
        assert_eq!(Grade::from_score(60), Grade::D);
        assert_eq!(Grade::from_score(59), Grade::F);
        assert_eq!(Grade::from_score(0), Grade::F);
    }

    #[test]
    fn test_breakdown_total_clamps() {
        let breakdown = ScoreBreakdown {
            title: 30,
            description: 20,
            keyword: 20,
            readability: 15,
            links: 10,
        };
        assert_eq!(breakdown.total(), 95);

        let mut saturated = breakdown;
        saturated.add(Category::Links, 20);
        assert_eq!(saturated.links, 30);
        assert_eq!(saturated.total(), 100);
    }

    #[test]
    fn test_breakdown_entries_follow_evaluation_order() {
        let breakdown = ScoreBreakdown {
            title: 1,
            description: 2,
            keyword: 3,
            readability: 4,
            links: 5,
        };
        let points: Vec<u8> = breakdown.entries().iter().map(|(_, p)| *p).collect();
        assert_eq!(points, vec![1, 2, 3, 4, 5]);
        assert_eq!(breakdown.get(Category::Keyword), 3);
    }

    #[test]
    fn test_document_report_flattens_result() {
        let report = DocumentReport {
            file_path: PathBuf::from("kitchens.seo.json"),
            result: AnalysisResult {
                score: 20,
                readability_score: 100,
                checks: vec![],
            },
            breakdown: ScoreBreakdown::default(),
            grade: Grade::F,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["filePath"], "kitchens.seo.json");
        assert_eq!(json["score"], 20);
        assert_eq!(json["readabilityScore"], 100);
        assert!(json["checks"].as_array().unwrap().is_empty());
        assert_eq!(json["grade"], "F");
    }

    #[test]
    fn test_every_category_budget_sums_to_90() {
        let total: u32 = [
            Category::Title,
            Category::Description,
            Category::Keyword,
            Category::Readability,
            Category::Links,
        ]
        .iter()
        .map(|c| c.max_points() as u32)
        .sum();
        assert_eq!(total, 90);
    }
}
