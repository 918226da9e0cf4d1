//! Chunk types shared by the index, retrieval, and synthesis layers

use serde::{Deserialize, Serialize};

/// A bounded span of document text, the unit of retrieval.
///
/// The persisted chunk list and the vector index are positionally aligned:
/// entry `i` of both always describes the same chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk text
    pub text: String,
    /// Source document label (filename within the knowledge base)
    pub source: String,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
        }
    }
}

/// A retrieved chunk with its similarity score.
///
/// The score is the inner product of the query and chunk embeddings; both are
/// unit-norm, so it behaves as a cosine similarity.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    /// The retrieved chunk
    pub chunk: Chunk,
    /// Similarity score
    pub score: f32,
}

impl ScoredChunk {
    /// Source document label
    pub fn source(&self) -> &str {
        &self.chunk.source
    }

    /// Chunk text
    pub fn text(&self) -> &str {
        &self.chunk.text
    }
}
