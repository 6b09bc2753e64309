//! Link structure: anchors in the raw content

use super::{AnalysisContext, RuleOutcome, ScoringRule};
use crate::analyzer::text;
use crate::{Category, Check, CheckId, CheckStatus, Priority};

const MIN_LINKS: usize = 2;

/// Rule for internal/external linking
pub struct LinkStructureRule;

impl LinkStructureRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LinkStructureRule {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoringRule for LinkStructureRule {
    fn name(&self) -> &'static str {
        "links"
    }

    fn category(&self) -> Category {
        Category::Links
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> RuleOutcome {
        let mut outcome = RuleOutcome::default();
        let links = text::count_links(ctx.content);

        if links >= MIN_LINKS {
            outcome.award(10);
            outcome.push(
                Check::new(
                    CheckId::LinkStructure,
                    CheckStatus::Good,
                    Priority::Low,
                    "Link structure",
                    format!("The content contains {} links.", links),
                )
                .with_value(links),
            );
        } else {
            outcome.award(5);
            outcome.push(
                Check::new(
                    CheckId::LinkStructureLow,
                    CheckStatus::Warning,
                    Priority::Low,
                    "Add more links",
                    format!(
                        "The content contains {} link{}. Link to related services, projects or posts.",
                        links,
                        if links == 1 { "" } else { "s" }
                    ),
                )
                .with_value(links),
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
    fn test_no_links() {
        let outcome = outcome_for(&LinkStructureRule::new(), "", "", "", "plain text");
        assert_eq!(outcome.points, 5);
        assert_eq!(ids(&outcome), vec![CheckId::LinkStructureLow]);
        assert_eq!(outcome.checks[0].priority, Priority::Low);
    }

    #[test]
    fn test_one_link_is_low() {
        let content = r#"See <a href="/projects">our projects</a>."#;
        let outcome = outcome_for(&LinkStructureRule::new(), "", "", "", content);
        assert_eq!(outcome.points, 5);
        assert!(outcome.checks[0].description.contains("1 link."));
    }

    #[test]
    fn test_two_links_is_good() {
        let content = r#"<a href="/kitchens">Kitchens</a> and <a href="/contact">contact</a>"#;
        let outcome = outcome_for(&LinkStructureRule::new(), "", "", "", content);
        assert_eq!(outcome.points, 10);
        assert_eq!(ids(&outcome), vec![CheckId::LinkStructure]);
        assert_eq!(outcome.checks[0].value, Some(crate::CheckValue::Number(2)));
    }
}
