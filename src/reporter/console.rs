//! Console reporter with colored output

use crate::analyzer::engine::AggregateStats;
use crate::analyzer::scoring::ScoreCalculator;
use crate::{Check, CheckStatus, DocumentReport, Grade};
use colored::Colorize;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show verbose output
    verbose: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Report a single document
    pub fn report(&self, report: &DocumentReport) {
        print!("{}", self.render(report));
    }

    /// Report multiple documents with summary
    pub fn report_many(&self, reports: &[DocumentReport], stats: &AggregateStats) {
        for report in reports {
            self.report(report);
            println!("{}", "─".repeat(60));
        }

        print!("{}", self.render_summary(stats));
    }

    /// Report in quiet mode (just score)
    pub fn report_quiet(&self, report: &DocumentReport) {
        println!("{}", self.render_quiet(report));
    }

    fn render_quiet(&self, report: &DocumentReport) -> String {
        format!(
            "{}: {} ({})",
            report.file_path.display(),
            report.result.score,
            self.colorize_grade(report.grade)
        )
    }

    /// Full report as text, so tests can inspect it
    pub fn render(&self, report: &DocumentReport) -> String {
        let mut out = String::new();
        self.render_header(report, &mut out);
        self.render_score(report, &mut out);
        self.render_breakdown(report, &mut out);
        if !report.result.checks.is_empty() {
            self.render_checks(&report.result.checks, &mut out);
        }
        self.render_recommendations(report, &mut out);
        out.push('\n');
        out
    }

    fn render_header(&self, report: &DocumentReport, out: &mut String) {
        out.push('\n');
        out.push_str(&format!(
            "{}\n",
            self.paint(
                format!("SEO Analysis: {}", report.file_path.display()),
                |s| s.bold()
            )
        ));
        out.push_str(&format!(
            "   Readability: {} (Flesch Reading Ease)\n\n",
            report.result.readability_score
        ));
    }

    fn render_score(&self, report: &DocumentReport, out: &mut String) {
        let score_bar = self.create_score_bar(report.result.score);
        out.push_str(&format!(
            "   Score: {} {}\n",
            score_bar,
            self.colorize_grade(report.grade)
        ));
        out.push_str(&format!(
            "   {}\n\n",
            self.paint(ScoreCalculator::grade_description(report.grade), |s| s
                .dimmed())
        ));
    }

    fn render_breakdown(&self, report: &DocumentReport, out: &mut String) {
        out.push_str(&format!(
            "   {}\n",
            self.paint("Score Breakdown:", |s| s.bold())
        ));

        for (category, points) in report.breakdown.entries() {
            let max = category.max_points();
            let bar = self.create_mini_bar(points, max);
            let score_str = format!("{:>2}/{}", points, max);
            let colored_score = if points >= max {
                self.paint(score_str, |s| s.green())
            } else if points * 2 >= max {
                self.paint(score_str, |s| s.yellow())
            } else {
                self.paint(score_str, |s| s.red())
            };
            out.push_str(&format!("   {} {} {}\n", bar, colored_score, category));
        }
        out.push('\n');
    }

    fn render_checks(&self, checks: &[Check], out: &mut String) {
        out.push_str(&format!("   {}\n", self.paint("Checks:", |s| s.bold())));

        let passing = checks
            .iter()
            .filter(|c| c.status == CheckStatus::Good)
            .count();

        // Checks arrive sorted: errors, warnings, then passing
        for check in checks {
            if check.status == CheckStatus::Good && !self.verbose && checks.len() > 5 {
                continue;
            }
            self.render_check(check, out);
        }

        if !self.verbose && checks.len() > 5 && passing > 0 {
            out.push_str(&format!(
                "   {} {} passing checks (use --verbose to show)\n",
                self.paint("✓", |s| s.green()),
                passing
            ));
        }

        out.push('\n');
    }

    fn render_check(&self, check: &Check, out: &mut String) {
        let icon = match check.status {
            CheckStatus::Error => self.paint("✗", |s| s.red()),
            CheckStatus::Warning => self.paint("⚠", |s| s.yellow()),
            CheckStatus::Good => self.paint("✓", |s| s.green()),
        };

        let value = check
            .value
            .as_ref()
            .map(|v| format!(" ({})", v))
            .unwrap_or_default();
        out.push_str(&format!(
            "   {} [{}] {}{}\n",
            icon,
            self.paint(check.id.as_str(), |s| s.dimmed()),
            check.title,
            value
        ));

        if check.status != CheckStatus::Good || self.verbose {
            out.push_str(&format!(
                "       {} {}\n",
                self.paint("→", |s| s.dimmed()),
                self.paint(check.description.as_str(), |s| s.italic())
            ));
        }

        if self.verbose {
            out.push_str(&format!(
                "       {} {}\n",
                self.paint("↳", |s| s.dimmed()),
                self.paint(
                    format!(
                        "priority: {}, category: {}",
                        check.priority,
                        check.id.category()
                    ),
                    |s| s.dimmed()
                )
            ));
        }
    }

    fn render_recommendations(&self, report: &DocumentReport, out: &mut String) {
        if report.result.score >= 90 {
            return;
        }

        out.push_str(&format!(
            "   {}\n",
            self.paint("Recommendations:", |s| s.bold())
        ));
        for rec in ScoreCalculator::recommendations(&report.breakdown)
            .iter()
            .take(3)
        {
            out.push_str(&format!("   {} {}\n", self.paint("→", |s| s.cyan()), rec));
        }
    }

    fn render_summary(&self, stats: &AggregateStats) -> String {
        let rule = "═".repeat(60);
        let mut out = String::new();
        out.push('\n');
        out.push_str(&format!("{}\n", rule));
        out.push_str(&format!("{}\n", self.paint("Summary", |s| s.bold())));
        out.push_str(&format!("{}\n", rule));
        out.push_str(&format!(
            "   Documents analyzed:  {}\n",
            self.paint(stats.documents_analyzed.to_string(), |s| s.bold())
        ));
        out.push_str(&format!(
            "   Average score:       {} ({})\n",
            self.paint(stats.average_score.to_string(), |s| s.bold()),
            self.colorize_grade(stats.average_grade)
        ));
        out.push_str(&format!(
            "   Average readability: {}\n",
            stats.average_readability
        ));
        out.push_str(&format!("   Total checks:        {}\n", stats.total_checks));
        out.push_str(&format!("   Errors:              {}\n\n", stats.total_errors));
        out
    }

    fn paint<S: Into<String>>(
        &self,
        text: S,
        style: impl Fn(colored::ColoredString) -> colored::ColoredString,
    ) -> String {
        let text = text.into();
        if self.use_colors {
            style(text.as_str().normal()).to_string()
        } else {
            text
        }
    }

    fn colorize_grade(&self, grade: Grade) -> String {
        self.paint(grade.to_string(), |s| match grade {
            Grade::A => s.green().bold(),
            Grade::B => s.green(),
            Grade::C => s.yellow(),
            Grade::D => s.red(),
            Grade::F => s.red().bold(),
        })
    }

    fn create_score_bar(&self, score: u8) -> String {
        let filled = (score as usize * 20) / 100;
        let empty = 20 - filled;

        let bar = format!("[{}{}] {:>3}%", "█".repeat(filled), "░".repeat(empty), score);

        if score >= 80 {
            self.paint(bar, |s| s.green())
        } else if score >= 60 {
            self.paint(bar, |s| s.yellow())
        } else {
            self.paint(bar, |s| s.red())
        }
    }

    /// Title points can exceed the budget; the bar just fills up
    fn create_mini_bar(&self, points: u8, max: u8) -> String {
        let filled = ((points as usize * 10) / max.max(1) as usize).min(10);
        let empty = 10 - filled;
        format!("[{}{}]", "▓".repeat(filled), "░".repeat(empty))
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}
