//! Essay text normalization.
//!
//! Dataset rows and user submissions arrive with inconsistent whitespace
//! and stray spaces before punctuation. Retrieval and scoring both operate
//! on the cleaned form, so cleanup lives here and nowhere else.


use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

static SPACE_BEFORE_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s([.,;:!?])").expect("valid regex"));

/// Filler phrases stripped before topic extraction.
const QUESTION_FILLER: &[&str] = &[
    "discuss",
    "to what extent",
    "advantages",
    "disadvantages",
    "opinion",
    "view",
    "agree",
    "disagree",
];

/// Collapses whitespace runs to a single space, removes the space that
/// precedes `. , ; : ! ?`, and trims. Idempotent.
pub fn clean_essay(essay: &str) -> String {
    let collapsed = WHITESPACE_RUNS.replace_all(essay, " ");
    let cleaned = SPACE_BEFORE_PUNCTUATION.replace_all(&collapsed, "$1");
    cleaned.trim().to_string()
}

/// Returns the whitespace-separated token count (0 for empty input).
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Extracts a rough topic string from a task question.
///
/// Lowercases, strips the filler phrases common to Task 2 questions, and
/// returns the trimmed first `.`/`,`-delimited segment. Falls back to
/// `"general"` when nothing substantive remains, so the result is never
/// empty.
pub fn extract_main_topic(question: &str) -> String {
    let mut lowered = question.to_lowercase();
    for phrase in QUESTION_FILLER {
        lowered = lowered.replace(phrase, "");
    }

    let first_segment = lowered.split(['.', ',']).next().unwrap_or("").trim();
    if first_segment.is_empty() {
        "general".to_string()
    } else {
        first_segment.to_string()
    }
}
