//! Response types for the chat and reindex endpoints

use serde::{Deserialize, Serialize};

use crate::config::FALLBACK_MESSAGE;
use crate::types::CoreFaqItem;

/// Answer to a chat question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Answer text
    pub answer: String,
    /// Source document labels backing the answer
    pub sources: Vec<String>,
    /// Confidence in [0, 1]
    pub confidence: f32,
    /// Whether this is the fixed fallback answer
    pub is_fallback: bool,
}

impl ChatResponse {
    /// Build an answered (non-fallback) response
    pub fn answered(answer: impl Into<String>, sources: Vec<String>, confidence: f32) -> Self {
        Self {
            answer: answer.into(),
            sources,
            confidence: clamp01(confidence),
            is_fallback: false,
        }
    }

    /// Build the fixed fallback response.
    ///
    /// The confidence still reflects the best similarity score so callers can
    /// distinguish "nothing close" from "close but rejected".
    pub fn fallback(confidence: f32) -> Self {
        Self {
            answer: FALLBACK_MESSAGE.to_string(),
            sources: Vec::new(),
            confidence: clamp01(confidence),
            is_fallback: true,
        }
    }

    /// Build a response from a routed reference item
    pub fn from_item(item: &CoreFaqItem, confidence: f32) -> Self {
        Self {
            answer: item.reference_answer.trim().to_string(),
            sources: item.sources.clone(),
            confidence: clamp01(confidence),
            is_fallback: false,
        }
    }
}

/// Clamp a confidence value to [0, 1], mapping NaN to 0.
pub fn clamp01(x: f32) -> f32 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// Summary statistics of an index build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of indexed documents
    pub docs: usize,
    /// Number of chunks
    pub chunks: usize,
    /// Embedding dimensionality
    pub dim: usize,
}

/// Response of the reindex endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReindexResponse {
    /// Whether the rebuild succeeded
    pub ok: bool,
    /// Rebuild statistics
    pub stats: IndexStats,
}
