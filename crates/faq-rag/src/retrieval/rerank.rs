//! Source-aware reranking of retrieved chunks

use crate::types::ScoredChunk;

// Question-keyword sets and the document each one favors. Similarity search
// alone conflates topically adjacent hits (a process question matching the
// pricing document); these affinities encode what the embedding under-weights.
const AFFINITIES: &[(&[&str], &str, f32)] = &[
    (
        &["reschedul", "refund", "privacy", "policy"],
        "policies.md",
        2.0,
    ),
    (
        &["sla", "severity", "support hour", "business hour", "outage"],
        "support.md",
        2.0,
    ),
    (
        &[
            "pricing",
            "price",
            "payment",
            "milestone",
            "fixed price",
            "time & materials",
            "time and materials",
            "t&m",
        ],
        "pricing.md",
        2.0,
    ),
    (&["process", "nda", "sprint", "engagement"], "process.md", 1.5),
    (&["service", "discovery", "mvp"], "services.md", 1.5),
];

fn source_boost(question: &str, source: &str) -> f32 {
    let q = question.to_lowercase();
    let src = source.to_lowercase();

    AFFINITIES
        .iter()
        .filter(|(keywords, doc, _)| {
            src.contains(doc) && keywords.iter().any(|k| q.contains(k))
        })
        .map(|(_, _, boost)| boost)
        .sum()
}

/// Reorder retrieved chunks by source affinity plus similarity.
///
/// Pure reordering: nothing is filtered, and ties keep their retrieval order.
pub fn rerank_chunks(question: &str, mut chunks: Vec<ScoredChunk>) -> Vec<ScoredChunk> {
    chunks.sort_by(|a, b| {
        let ka = source_boost(question, a.source()) + a.score;
        let kb = source_boost(question, b.source()) + b.score;
        kb.total_cmp(&ka)
    });
    chunks
}
