//! Readability via Flesch Reading Ease

use super::{AnalysisContext, RuleOutcome, ScoringRule};
use crate::{Category, Check, CheckId, CheckStatus, Priority};

const EASY_THRESHOLD: u8 = 60;
const FAIR_THRESHOLD: u8 = 50;

/// Rule awarding points for easy-to-read content
pub struct ReadabilityRule;

impl ReadabilityRule {
    pub fn new() -> Self {
        Self
    }

    fn points_for(score: u8) -> u8 {
        if score >= EASY_THRESHOLD {
            15
        } else if score >= FAIR_THRESHOLD {
            10
        } else {
            5
        }
    }
}

impl Default for ReadabilityRule {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoringRule for ReadabilityRule {
    fn name(&self) -> &'static str {
        "readability"
    }

    fn category(&self) -> Category {
        Category::Readability
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> RuleOutcome {
        let mut outcome = RuleOutcome::default();
        let score = ctx.readability_score;
        outcome.award(Self::points_for(score));

        if score < EASY_THRESHOLD {
            outcome.push(
                Check::new(
                    CheckId::ReadabilityIssue,
                    CheckStatus::Warning,
                    Priority::Medium,
                    "Readability",
                    format!(
                        "Flesch Reading Ease is {}. Use shorter sentences and simpler words.",
                        score
                    ),
                )
                .with_value(score),
            );
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::rules::test_support::{ids, outcome_for};

    #[test]
    fn test_point_bands() {
        assert_eq!(ReadabilityRule::points_for(100), 15);
        assert_eq!(ReadabilityRule::points_for(60), 15);
        assert_eq!(ReadabilityRule::points_for(59), 10);
        assert_eq!(ReadabilityRule::points_for(50), 10);
        assert_eq!(ReadabilityRule::points_for(49), 5);
        assert_eq!(ReadabilityRule::points_for(0), 5);
    }

    #[test]
    fn test_empty_content_reads_easily() {
        let outcome = outcome_for(&ReadabilityRule::new(), "", "", "", "");
        assert_eq!(outcome.points, 15);
        assert!(outcome.checks.is_empty());
    }

    #[test]
    fn test_dense_content_warns() {
        let content = "<p>Incomprehensibilities characterization institutionalization</p>";
        let outcome = outcome_for(&ReadabilityRule::new(), "", "", "", content);
        assert_eq!(outcome.points, 5);
        assert_eq!(ids(&outcome), vec![CheckId::ReadabilityIssue]);
        assert_eq!(outcome.checks[0].value, Some(crate::CheckValue::Number(0)));
    }
}
