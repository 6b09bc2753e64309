//! Keyphrase usage in the body content

use super::{AnalysisContext, RuleOutcome, ScoringRule};
use crate::analyzer::text;
use crate::{Category, Check, CheckId, CheckStatus, Priority};

const BASELINE_POINTS: u8 = 5;
const MIN_DENSITY: f64 = 0.5;
const MAX_DENSITY: f64 = 2.5;

/// Rule for keyphrase presence, density and early placement in the body
pub struct KeywordRule;

impl KeywordRule {
    pub fn new() -> Self {
        Self
    }

    /// Keyphrase occurrences per hundred words
    pub fn density(matches: usize, word_count: usize) -> f64 {
        if word_count == 0 {
            return 0.0;
        }
        matches as f64 / word_count as f64 * 100.0
    }
}

impl Default for KeywordRule {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoringRule for KeywordRule {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn category(&self) -> Category {
        Category::Keyword
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> RuleOutcome {
        let mut outcome = RuleOutcome::default();
        let keyphrase = ctx.focus_keyphrase;

        if keyphrase.is_empty() || ctx.content.is_empty() {
            return outcome;
        }

        let matches = text::count_keyphrase(&ctx.plain_text, keyphrase);
        if matches == 0 {
            outcome.push(Check::new(
                CheckId::KwMissingContent,
                CheckStatus::Error,
                Priority::High,
                "Keyphrase missing from content",
                format!("The focus keyphrase \"{}\" never appears in the content.", keyphrase),
            ));
            return outcome;
        }

        outcome.award(BASELINE_POINTS);

        let density = Self::density(matches, ctx.word_count);
        let times = if matches == 1 { "time" } else { "times" };
        if (MIN_DENSITY..=MAX_DENSITY).contains(&density) {
            outcome.award(10);
            outcome.push(
                Check::new(
                    CheckId::KwDensity,
                    CheckStatus::Good,
                    Priority::Low,
                    "Keyphrase density",
                    format!(
                        "The keyphrase appears {} {} ({:.2}% of words). Nicely balanced.",
                        matches, times, density
                    ),
                )
                .with_value(format!("{:.2}%", density)),
            );
        } else {
            outcome.award(7);
            let verdict = if density < MIN_DENSITY { "low" } else { "too high" };
            outcome.push(
                Check::new(
                    CheckId::KwDensityAlt,
                    CheckStatus::Warning,
                    Priority::Medium,
                    "Keyphrase density",
                    format!(
                        "The keyphrase appears {} {} ({:.2}% of words), which is {}. Aim for 0.5-2.5%.",
                        matches, times, density, verdict
                    ),
                )
                .with_value(format!("{:.2}%", density)),
            );
        }

        if text::first_paragraph(&ctx.plain_text).contains(&keyphrase.to_lowercase()) {
            outcome.award(5);
            outcome.push(Check::new(
                CheckId::KwFirstPara,
                CheckStatus::Good,
                Priority::Low,
                "Keyphrase in introduction",
                "The keyphrase appears early in the content.",
            ));
        } else {
            outcome.push(Check::new(
                CheckId::KwFirstParaMissing,
                CheckStatus::Warning,
                Priority::Medium,
                "Keyphrase missing from introduction",
                format!(
                    "Use \"{}\" within the first {} characters so readers and search engines see the topic straight away.",
                    keyphrase,
                    text::FIRST_PARAGRAPH_CHARS
                ),
            ));
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::rules::test_support::{ids, outcome_for};

    fn filler(words: usize) -> String {
        vec!["timber"; words].join(" ")
    }

    #[test]
    fn test_skipped_without_keyphrase_or_content() {
        let rule = KeywordRule::new();
        let no_keyphrase = outcome_for(&rule, "", "", "", "some content");
        assert_eq!(no_keyphrase, RuleOutcome::default());
        let no_content = outcome_for(&rule, "", "", "kitchen", "");
        assert_eq!(no_content, RuleOutcome::default());
    }

    #[test]
    fn test_missing_from_content_stops_evaluation() {
        let outcome = outcome_for(&KeywordRule::new(), "", "", "kitchen", "All about bathrooms.");
        assert_eq!(outcome.points, 0);
        assert_eq!(ids(&outcome), vec![CheckId::KwMissingContent]);
    }

    #[test]
    fn test_markup_only_content_counts_as_missing() {
        let outcome = outcome_for(&KeywordRule::new(), "", "", "kitchen", "<img src=\"kitchen.jpg\">");
        assert_eq!(ids(&outcome), vec![CheckId::KwMissingContent]);
    }

    #[test]
    fn test_ideal_density_and_first_paragraph() {
        // 2 matches in 100 words = 2.00%
        let content = format!("kitchen {} kitchen", filler(98));
        let outcome = outcome_for(&KeywordRule::new(), "", "", "Kitchen", &content);
        assert_eq!(outcome.points, 20);
        assert_eq!(ids(&outcome), vec![CheckId::KwDensity, CheckId::KwFirstPara]);
        assert_eq!(
            outcome.checks[0].value,
            Some(crate::CheckValue::Text("2.00%".to_string()))
        );
        assert!(outcome.checks[0].description.contains("2 times"));
    }

    #[test]
    fn test_low_density() {
        // 1 match in 400 words = 0.25%
        let content = format!("kitchen {}", filler(399));
        let outcome = outcome_for(&KeywordRule::new(), "", "", "kitchen", &content);
        assert_eq!(outcome.points, 17);
        let check = &outcome.checks[0];
        assert_eq!(check.id, CheckId::KwDensityAlt);
        assert!(check.description.contains("low"));
        assert_eq!(check.value, Some(crate::CheckValue::Text("0.25%".to_string())));
    }

    #[test]
    fn test_high_density() {
        let content = "kitchen kitchen kitchen timber";
        let outcome = outcome_for(&KeywordRule::new(), "", "", "kitchen", content);
        let check = &outcome.checks[0];
        assert_eq!(check.id, CheckId::KwDensityAlt);
        assert!(check.description.contains("too high"));
    }

    #[test]
    fn test_keyphrase_only_after_first_paragraph() {
        let content = format!("{} kitchen", filler(150));
        let outcome = outcome_for(&KeywordRule::new(), "", "", "kitchen", &content);
        assert_eq!(outcome.points, 15);
        assert_eq!(
            ids(&outcome),
            vec![CheckId::KwDensity, CheckId::KwFirstParaMissing]
        );
    }

    #[test]
    fn test_counts_literal_metacharacter_keyphrase() {
        let content = format!(
            "Cabinets (Melbourne) {} cabinets (melbourne)",
            filler(120)
        );
        let outcome = outcome_for(&KeywordRule::new(), "", "", "cabinets (melbourne)", &content);
        assert_eq!(outcome.checks[0].id, CheckId::KwDensity);
        assert!(outcome.checks[0].description.contains("2 times"));
    }

    #[test]
    fn test_density_helper() {
        assert_eq!(KeywordRule::density(0, 0), 0.0);
        assert_eq!(KeywordRule::density(1, 4), 25.0);
    }
}
