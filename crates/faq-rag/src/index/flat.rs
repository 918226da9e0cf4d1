//! Flat exact nearest-neighbor index over an embedding matrix

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Exact inner-product index.
///
/// Vectors are stored row-major in a single flat buffer; search is a full
/// scan, which is the right trade-off for a corpus of tens of documents.
/// With unit-norm vectors the inner product is the cosine similarity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatIpIndex {
    dim: usize,
    vectors: Vec<f32>,
}

impl FlatIpIndex {
    /// Create an empty index for `dim`-dimensional vectors
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            vectors: Vec::new(),
        }
    }

    /// Embedding dimensionality
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored vectors
    pub fn len(&self) -> usize {
        if self.dim == 0 {
            0
        } else {
            self.vectors.len() / self.dim
        }
    }

    /// Whether the index holds no vectors
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Append a vector; position equals the current length before the call.
    pub fn add(&mut self, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dim {
            return Err(Error::index(format!(
                "dimension mismatch: expected {}, got {}",
                self.dim,
                vector.len()
            )));
        }
        self.vectors.extend_from_slice(vector);
        Ok(())
    }

    /// Exact top-k search by inner product.
    ///
    /// Returns up to `k` `(position, score)` pairs, best first. Fewer than
    /// `k` results are returned when the index is small; there are no
    /// sentinel entries to strip.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<(usize, f32)> {
        if query.len() != self.dim || self.is_empty() || k == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .chunks_exact(self.dim)
            .enumerate()
            .map(|(i, row)| (i, dot(query, row)))
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(k);
        scored
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
