//! Meta description: presence, length and keyphrase

use super::{AnalysisContext, RuleOutcome, ScoringRule};
use crate::{Category, Check, CheckId, CheckStatus, Priority};

const BASELINE_POINTS: u8 = 5;
const IDEAL_LENGTH: std::ops::RangeInclusive<usize> = 120..=160;
const ACCEPTABLE_LENGTH: std::ops::RangeInclusive<usize> = 100..=180;
const KEYPHRASE_POINTS: u8 = 5;

/// Rule for the meta description snippet
pub struct DescriptionRule;

impl DescriptionRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DescriptionRule {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoringRule for DescriptionRule {
    fn name(&self) -> &'static str {
        "description"
    }

    fn category(&self) -> Category {
        Category::Description
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> RuleOutcome {
        let mut outcome = RuleOutcome::default();

        if ctx.description.is_empty() {
            outcome.push(Check::new(
                CheckId::DescMissing,
                CheckStatus::Error,
                Priority::High,
                "Meta description missing",
                "Add a meta description. Search engines show it under the title.",
            ));
            return outcome;
        }

        outcome.award(BASELINE_POINTS);

        let len = ctx.description.chars().count();
        if IDEAL_LENGTH.contains(&len) {
            outcome.award(10);
            outcome.push(
                Check::new(
                    CheckId::DescLength,
                    CheckStatus::Good,
                    Priority::Low,
                    "Meta description length",
                    format!("The description is {} characters, within the ideal 120-160 range.", len),
                )
                .with_value(len),
            );
        } else if ACCEPTABLE_LENGTH.contains(&len) {
            outcome.award(7);
            outcome.push(
                Check::new(
                    CheckId::DescLengthOk,
                    CheckStatus::Warning,
                    Priority::Medium,
                    "Meta description length could be better",
                    format!("The description is {} characters. Aim for 120-160.", len),
                )
                .with_value(len),
            );
        } else {
            outcome.award(2);
            let problem = if len < 100 { "too short" } else { "too long" };
            outcome.push(
                Check::new(
                    CheckId::DescLengthBad,
                    CheckStatus::Error,
                    Priority::Medium,
                    "Meta description length",
                    format!(
                        "The description is {} ({} characters). Aim for 120-160 characters.",
                        problem, len
                    ),
                )
                .with_value(len),
            );
        }

        let keyphrase = ctx.focus_keyphrase;
        if !keyphrase.is_empty() {
            if ctx
                .description
                .to_lowercase()
                .contains(&keyphrase.to_lowercase())
            {
                outcome.award(KEYPHRASE_POINTS);
                outcome.push(Check::new(
                    CheckId::DescFocus,
                    CheckStatus::Good,
                    Priority::Low,
                    "Keyphrase in description",
                    format!("The meta description mentions \"{}\".", keyphrase),
                ));
            } else {
                outcome.push(Check::new(
                    CheckId::DescFocusMissing,
                    CheckStatus::Warning,
                    Priority::Medium,
                    "Keyphrase missing from description",
                    format!(
                        "Mention \"{}\" in the meta description; search engines bold matching terms.",
                        keyphrase
                    ),
                ));
            }
        }

        outcome
    }
}
