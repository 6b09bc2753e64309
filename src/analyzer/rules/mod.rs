//! Scoring rules, one per category

pub mod description;
pub mod keyword;
pub mod links;
pub mod readability;
pub mod title;

pub use description::DescriptionRule;
pub use keyword::KeywordRule;
pub use links::LinkStructureRule;
pub use readability::ReadabilityRule;
pub use title::TitleRule;

use super::text;
use crate::{AnalysisInput, Category, Check};

/// Everything a rule may look at, computed once per analysis
#[derive(Debug, Clone)]
pub struct AnalysisContext<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub focus_keyphrase: &'a str,
    /// Raw body content, markup included
    pub content: &'a str,
    /// Body content with markup stripped and whitespace collapsed
    pub plain_text: String,
    pub word_count: usize,
    /// Flesch Reading Ease of the plain text (0-100)
    pub readability_score: u8,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(input: &'a AnalysisInput, content: &'a str) -> Self {
        let plain_text = text::strip_markup(content);
        let word_count = text::word_count(&plain_text);
        let readability_score = text::flesch_reading_ease(&plain_text, word_count);
        Self {
            title: input.title(),
            description: input.description(),
            focus_keyphrase: input.focus_keyphrase(),
            content,
            plain_text,
            word_count,
            readability_score,
        }
    }
}

/// Points awarded and checks emitted by one rule
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleOutcome {
    pub points: u8,
    pub checks: Vec<Check>,
}

impl RuleOutcome {
    pub fn award(&mut self, points: u8) {
        self.points = self.points.saturating_add(points);
    }

    pub fn push(&mut self, check: Check) {
        self.checks.push(check);
    }
}

/// Trait for scoring rules
pub trait ScoringRule {
    /// Name of the rule
    fn name(&self) -> &'static str;

    /// Category whose points this rule awards
    fn category(&self) -> Category;

    /// Nominal point budget. Raw points may exceed it.
    fn max_points(&self) -> u8 {
        self.category().max_points()
    }

    /// Evaluate the content; points only ever add up
    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> RuleOutcome;
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn outcome_for<R: ScoringRule>(
        rule: &R,
        title: &str,
        description: &str,
        keyphrase: &str,
        content: &str,
    ) -> RuleOutcome {
        let input = AnalysisInput::new(title, description, keyphrase);
        let ctx = AnalysisContext::new(&input, content);
        rule.evaluate(&ctx)
    }

    pub fn ids(outcome: &RuleOutcome) -> Vec<crate::CheckId> {
        outcome.checks.iter().map(|c| c.id).collect()
    }
}
