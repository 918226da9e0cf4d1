//! Question normalization applied before any routing stage

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

// Word characters, whitespace, and the few symbols canonical questions use.
static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s&\-?()]+").expect("valid regex"));

/// Normalize a user question for routing and matching: lowercase, expand the
/// known "time & materials" abbreviations, collapse whitespace, strip
/// punctuation outside the allow-list.
pub fn normalize_question(s: &str) -> String {
    let s = s.trim().to_lowercase();
    let s = s
        .replace("t&m", "time & materials")
        .replace("t & m", "time & materials")
        .replace("t and m", "time & materials")
        .replace("time and materials", "time & materials");
    let s = WHITESPACE.replace_all(&s, " ");
    let s = DISALLOWED.replace_all(&s, "");
    s.trim().to_string()
}
