//! Lexical token overlap between question and candidate text

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

// English plus Persian function words; both appear in real user questions.
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "a", "an", "and", "or", "to", "of", "in", "on", "for", "with", "is", "are", "do",
        "does", "can", "we", "you", "your", "our", "what", "how", "when", "where", "which",
        "about", "from", "within", "into", "this", "that", "it", "as", "at", "by", "و", "یا",
        "از", "به", "در", "با", "برای", "که", "این", "آن", "است", "هست", "را", "می", "شود",
        "شما", "ما", "تا", "هم",
    ]
    .into_iter()
    .collect()
});

// Latin alphanumerics plus the Arabic-script block used by Persian.
static NON_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9a-z\u{0600}-\u{06FF}]+").expect("valid regex"));

/// Split text into meaningful tokens: case-folded, stopword-filtered,
/// single-character tokens dropped.
pub fn tokenize(s: &str) -> Vec<String> {
    let lowered = s.to_lowercase();
    let cleaned = NON_TOKEN.replace_all(&lowered, " ");
    cleaned
        .split_whitespace()
        .filter(|t| t.chars().count() > 1 && !STOPWORDS.contains(t))
        .map(str::to_string)
        .collect()
}

/// Share of meaningful question tokens that also occur in `text`.
pub fn lexical_overlap_ratio(question: &str, text: &str) -> f32 {
    let q: HashSet<String> = tokenize(question).into_iter().collect();
    if q.is_empty() {
        return 0.0;
    }
    let t: HashSet<String> = tokenize(text).into_iter().collect();
    let inter = q.intersection(&t).count();
    inter as f32 / q.len() as f32
}

/// Crude script check: Latin-dominant when the text carries at least
/// `max(3, 20% of length)` ASCII letters. The lexical gate is tuned for
/// Latin/mixed scripts and is skipped for anything else.
pub fn is_latin_text(s: &str) -> bool {
    let letters = s
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .count();
    letters >= 3.max(s.chars().count() / 5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_filters_stopwords_and_short_tokens() {
        let tokens = tokenize("What are your support hours on Friday?");
        assert_eq!(tokens, vec!["support", "hours", "friday"]);
    }

    #[test]
    fn tokenize_keeps_persian_words() {
        let tokens = tokenize("ساعات پشتیبانی چیست");
        assert!(tokens.contains(&"پشتیبانی".to_string()));
    }

    #[test]
    fn overlap_ratio_counts_shared_tokens() {
        let ratio = lexical_overlap_ratio(
            "what are your support hours",
            "Support hours: Mon-Fri, 09:00-17:00",
        );
        assert!((ratio - 1.0).abs() < f32::EPSILON);

        let none = lexical_overlap_ratio("what are your support hours", "refund policy details");
        assert_eq!(none, 0.0);
    }

    #[test]
    fn overlap_of_empty_question_is_zero() {
        assert_eq!(lexical_overlap_ratio("the a an", "anything"), 0.0);
    }

    #[test]
    fn latin_detection() {
        assert!(is_latin_text("what are your support hours"));
        assert!(!is_latin_text("ساعات پشتیبانی شما چیست؟"));
    }
}
