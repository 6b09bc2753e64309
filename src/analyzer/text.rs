//! Text preprocessing shared by the scoring rules
//!
//! Markup handling is intentionally naive: anything between `<` and `>` is a
//! tag. Word counts and keyphrase matches are defined relative to this rule,
//! so a stray `<` in prose swallows text up to the next `>`.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static SENTENCE_END_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());
static ANCHOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<a\s").unwrap());

static SILENT_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^aeiouy])(?:es|ed|e)$").unwrap());
static LEADING_Y_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^y").unwrap());
static VOWEL_GROUP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[aeiouy]{1,2}").unwrap());

/// Number of leading plain-text characters treated as the first paragraph
pub const FIRST_PARAGRAPH_CHARS: usize = 500;

/// Replace tags with a space, collapse whitespace runs and trim.
pub fn strip_markup(content: &str) -> String {
    let without_tags = TAG_RE.replace_all(content, " ");
    WHITESPACE_RE
        .replace_all(&without_tags, " ")
        .trim()
        .to_string()
}

/// Whitespace-separated tokens, empty tokens excluded
pub fn word_count(plain: &str) -> usize {
    plain.split_whitespace().count()
}

/// Case-insensitive count of literal keyphrase occurrences.
///
/// The keyphrase is regex-escaped, so editor input such as
/// `cabinets (melbourne)` is matched literally.
pub fn count_keyphrase(plain: &str, keyphrase: &str) -> usize {
    if keyphrase.is_empty() {
        return 0;
    }
    match RegexBuilder::new(&regex::escape(keyphrase))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re.find_iter(plain).count(),
        Err(e) => {
            tracing::warn!(error = %e, "keyphrase pattern rejected, counting no matches");
            0
        }
    }
}

/// Non-empty segments between runs of `.`, `!` and `?`
pub fn count_sentences(plain: &str) -> usize {
    SENTENCE_END_RE
        .split(plain)
        .filter(|segment| !segment.is_empty())
        .count()
}

/// Coarse syllable estimate applied once over the whole text.
///
/// Lowercases, strips one silent trailing `es`/`ed`/`e` and a leading `y`,
/// then counts vowel groups of one or two letters. Never returns 0.
pub fn count_syllables(text: &str) -> usize {
    let lower = text.to_lowercase();
    if lower.chars().count() <= 3 {
        return 1;
    }
    let trimmed = SILENT_SUFFIX_RE.replace(&lower, "${1}");
    let trimmed = LEADING_Y_RE.replace(&trimmed, "");
    match VOWEL_GROUP_RE.find_iter(&trimmed).count() {
        0 => 1,
        n => n,
    }
}

/// Flesch Reading Ease, clamped to 0..=100 and rounded.
///
/// Text without words or sentences reads as 100.
pub fn flesch_reading_ease(plain: &str, words: usize) -> u8 {
    let sentences = count_sentences(plain);
    if words == 0 || sentences == 0 {
        return 100;
    }
    let syllables = count_syllables(plain);
    let words = words as f64;
    let score = 206.835 - 1.015 * (words / sentences as f64) - 84.6 * (syllables as f64 / words);
    score.clamp(0.0, 100.0).round() as u8
}

/// Anchor tags opening in the raw content (`<a` followed by whitespace)
pub fn count_links(content: &str) -> usize {
    ANCHOR_RE.find_iter(content).count()
}

/// Lowercased first paragraph of the plain text
pub fn first_paragraph(plain: &str) -> String {
    plain
        .chars()
        .take(FIRST_PARAGRAPH_CHARS)
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markup_replaces_tags_with_space() {
        assert_eq!(strip_markup("<p>Hello <b>world</b></p>"), "Hello world");
        assert_eq!(strip_markup("one<br>two"), "one two");
    }

    #[test]
    fn test_strip_markup_collapses_whitespace() {
        assert_eq!(strip_markup("  a \n\n\t b  "), "a b");
        assert_eq!(strip_markup(""), "");
        assert_eq!(strip_markup("<div></div>"), "");
    }

    #[test]
    fn test_strip_markup_naive_angle_brackets() {
        // "< b" opens a tag that runs to the next '>'
        assert_eq!(strip_markup("a < b and c > d"), "a d");
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("one"), 1);
        assert_eq!(word_count("one two  three"), 3);
    }

    #[test]
    fn test_count_keyphrase_case_insensitive() {
        let text = "Kitchen cabinets and more KITCHEN CABINETS";
        assert_eq!(count_keyphrase(text, "kitchen cabinets"), 2);
    }

    #[test]
    fn test_count_keyphrase_escapes_metacharacters() {
        let text = "Cabinets (Melbourne) and cabinets (melbourne) but not cabinets melbourne";
        assert_eq!(count_keyphrase(text, "cabinets (melbourne)"), 2);
        assert_eq!(count_keyphrase("price $5.00 or $5x00", "$5.00"), 1);
        assert_eq!(count_keyphrase("a+b a+b", "a+b"), 2);
        assert_eq!(count_keyphrase("[[[", "["), 3);
    }

    #[test]
    fn test_count_keyphrase_empty() {
        assert_eq!(count_keyphrase("anything", ""), 0);
        assert_eq!(count_keyphrase("", "word"), 0);
    }

    #[test]
    fn test_count_sentences() {
        assert_eq!(count_sentences("One. Two! Three?"), 3);
        assert_eq!(count_sentences("No punctuation here"), 1);
        assert_eq!(count_sentences("Wait... what?!"), 2);
        assert_eq!(count_sentences(""), 0);
        assert_eq!(count_sentences("..."), 0);
    }

    #[test]
    fn test_count_syllables_short_text() {
        assert_eq!(count_syllables("the"), 1);
        assert_eq!(count_syllables("yes"), 1);
        assert_eq!(count_syllables(""), 1);
    }

    #[test]
    fn test_count_syllables_vowel_groups() {
        assert_eq!(count_syllables("hello world"), 3);
        assert_eq!(count_syllables("yellow"), 2);
        assert_eq!(count_syllables("rhythm"), 1);
    }

    #[test]
    fn test_count_syllables_leading_y() {
        // "ttrium" after the strip: one vowel group
        assert_eq!(count_syllables("yttrium"), 1);
        assert_eq!(count_syllables("ytterbium"), 2);
    }

    #[test]
    fn test_count_syllables_silent_suffix() {
        assert_eq!(count_syllables("cake"), 1);
        assert_eq!(count_syllables("makes"), 1);
        assert_eq!(count_syllables("HOPED"), 1);
    }

    #[test]
    fn test_flesch_empty_is_100() {
        assert_eq!(flesch_reading_ease("", 0), 100);
        assert_eq!(flesch_reading_ease("!!!", 1), 100);
    }

    #[test]
    fn test_flesch_simple_text_clamps_high() {
        let text = "The cat sat on the mat.";
        assert_eq!(flesch_reading_ease(text, word_count(text)), 100);
    }

    #[test]
    fn test_flesch_dense_text_clamps_low() {
        let text = "Incomprehensibilities characterization institutionalization";
        assert_eq!(flesch_reading_ease(text, word_count(text)), 0);
    }

    #[test]
    fn test_count_links() {
        let html = r#"<a href="/a">A</a> <a
href="/b">B</a> <abbr>x</abbr> <A href="/c">C</A>"#;
        assert_eq!(count_links(html), 2);
        assert_eq!(count_links("no links"), 0);
    }

    #[test]
    fn test_first_paragraph_limits_and_lowercases() {
        let text = format!("Intro {}", "x".repeat(600));
        let para = first_paragraph(&text);
        assert_eq!(para.chars().count(), FIRST_PARAGRAPH_CHARS);
        assert!(para.starts_with("intro "));
    }
}
