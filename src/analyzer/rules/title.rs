//! SEO title: presence, length and keyphrase placement

use super::{AnalysisContext, RuleOutcome, ScoringRule};
use crate::{Category, Check, CheckId, CheckStatus, Priority};

const BASELINE_POINTS: u8 = 5;
const IDEAL_LENGTH: std::ops::RangeInclusive<usize> = 50..=60;
const ACCEPTABLE_LENGTH: std::ops::RangeInclusive<usize> = 40..=70;
const KEYPHRASE_POINTS: u8 = 10;
const KEYPHRASE_AT_START_BONUS: u8 = 5;

/// Rule for the SEO title shown in search results
pub struct TitleRule;

impl TitleRule {
    pub fn new() -> Self {
        Self
    }

    fn length_check(len: usize, outcome: &mut RuleOutcome) {
        if IDEAL_LENGTH.contains(&len) {
            outcome.award(10);
            outcome.push(
                Check::new(
                    CheckId::TitleLength,
                    CheckStatus::Good,
                    Priority::Low,
                    "SEO title length",
                    format!("The title is {} characters, within the ideal 50-60 range.", len),
                )
                .with_value(len),
            );
        } else if ACCEPTABLE_LENGTH.contains(&len) {
            outcome.award(7);
            outcome.push(
                Check::new(
                    CheckId::TitleLengthOk,
                    CheckStatus::Warning,
                    Priority::Medium,
                    "SEO title length could be better",
                    format!(
                        "The title is {} characters. Aim for 50-60 so it displays fully in search results.",
                        len
                    ),
                )
                .with_value(len),
            );
        } else {
            outcome.award(2);
            let problem = if len < 40 { "too short" } else { "too long" };
            outcome.push(
                Check::new(
                    CheckId::TitleLengthBad,
                    CheckStatus::Error,
                    Priority::High,
                    "SEO title length",
                    format!(
                        "The title is {} ({} characters). Aim for 50-60 characters.",
                        problem, len
                    ),
                )
                .with_value(len),
            );
        }
    }

    fn keyphrase_check(title: &str, keyphrase: &str, outcome: &mut RuleOutcome) {
        match title.to_lowercase().find(&keyphrase.to_lowercase()) {
            Some(position) => {
                outcome.award(KEYPHRASE_POINTS);
                if position == 0 {
                    outcome.award(KEYPHRASE_AT_START_BONUS);
                    outcome.push(Check::new(
                        CheckId::TitleFocus,
                        CheckStatus::Good,
                        Priority::Low,
                        "Keyphrase in title",
                        format!(
                            "The focus keyphrase \"{}\" appears at the very start of the title.",
                            keyphrase
                        ),
                    ));
                } else {
                    outcome.push(Check::new(
                        CheckId::TitleFocusPresent,
                        CheckStatus::Good,
                        Priority::Low,
                        "Keyphrase in title",
                        format!(
                            "The title contains \"{}\". Move it closer to the beginning for more impact.",
                            keyphrase
                        ),
                    ));
                }
            }
            None => outcome.push(Check::new(
                CheckId::TitleFocusMissing,
                CheckStatus::Error,
                Priority::High,
                "Keyphrase missing from title",
                format!(
                    "The focus keyphrase \"{}\" does not appear in the SEO title.",
                    keyphrase
                ),
            )),
        }
    }
}

impl Default for TitleRule {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoringRule for TitleRule {
    fn name(&self) -> &'static str {
        "title"
    }

    fn category(&self) -> Category {
        Category::Title
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> RuleOutcome {
        let mut outcome = RuleOutcome::default();

        if ctx.title.is_empty() {
            outcome.push(Check::new(
                CheckId::TitleMissing,
                CheckStatus::Error,
                Priority::High,
                "SEO title missing",
                "Add an SEO title. It is the headline searchers see in the results page.",
            ));
            return outcome;
        }

        outcome.award(BASELINE_POINTS);
        Self::length_check(ctx.title.chars().count(), &mut outcome);

        if !ctx.focus_keyphrase.is_empty() {
            Self::keyphrase_check(ctx.title, ctx.focus_keyphrase, &mut outcome);
        }

        outcome
    }
}
