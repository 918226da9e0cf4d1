//! Evidence gate: decide whether retrieval results justify an answer

use crate::types::ScoredChunk;

use super::lexical::{is_latin_text, lexical_overlap_ratio};

// The corpus holds indicative price ranges only; a request for a complete
// list must not be answered from near-miss chunks.
const KNOWN_GAP_PHRASES: &[&str] = &[
    "exact price list",
    "full price list",
    "complete price list",
];

/// Decide whether to fall back instead of answering from `chunks`.
///
/// Checks run in order and short-circuit: known-gap override, similarity
/// threshold, empty retrieval, lexical overlap guard. The lexical guard is
/// skipped for non-Latin-script questions because the tokenizer produces
/// unreliable ratios there.
pub fn should_fallback(
    question: &str,
    chunks: &[ScoredChunk],
    best_score: f32,
    similarity_threshold: f32,
    lexical_threshold: f32,
) -> bool {
    let q = question.to_lowercase();
    let q = q.trim();

    if KNOWN_GAP_PHRASES.iter().any(|p| q.contains(p)) {
        return true;
    }

    if best_score < similarity_threshold {
        return true;
    }

    if chunks.is_empty() {
        return true;
    }

    let max_overlap = chunks
        .iter()
        .map(|c| lexical_overlap_ratio(question, c.text()))
        .fold(0.0f32, f32::max);
    if is_latin_text(question) && max_overlap < lexical_threshold {
        return true;
    }

    false
}
