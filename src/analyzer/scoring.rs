//! Score interpretation: grades and recommendations

use crate::{Category, Grade, ScoreBreakdown};

/// Calculator for SEO score presentation
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Get a description of the grade
    pub fn grade_description(grade: Grade) -> &'static str {
        match grade {
            Grade::A => "Excellent - Ready to publish",
            Grade::B => "Good - A few tweaks would help",
            Grade::C => "Fair - Several SEO basics need attention",
            Grade::D => "Poor - Search snippets and content need work",
            Grade::F => "Failing - Fill in the SEO fields and rework the content",
        }
    }

    /// Get recommendations for categories below their nominal budget
    pub fn recommendations(breakdown: &ScoreBreakdown) -> Vec<String> {
        let mut recs = Vec::new();

        for (category, points) in breakdown.entries() {
            if points >= category.max_points() {
                continue;
            }
            let rec = match category {
                Category::Title => {
                    "Write a 50-60 character SEO title that opens with the focus keyphrase"
                }
                Category::Description => {
                    "Keep the meta description between 120 and 160 characters and mention the keyphrase"
                }
                Category::Keyword => {
                    "Use the focus keyphrase early in the content, at 0.5-2.5% of words"
                }
                Category::Readability => "Shorten sentences and prefer plain words",
                Category::Links => "Link to at least two related pages",
            };
            recs.push(rec.to_string());
        }

        if recs.is_empty() {
            recs.push("Content is in good shape! Keep the keyphrase focused.".to_string());
        }

        recs
    }
}
