//! Deterministic hashed bag-of-tokens embedder

use async_trait::async_trait;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::Result;

use super::embedding::EmbeddingProvider;

/// Deterministic local embedder: FNV-hashed token counts, L2-normalized.
///
/// No model download, no network; the default backend and the one the test
/// suite runs against. Semantically crude but embedding-space consistent,
/// which is all the retrieval layer requires.
#[derive(Debug, Clone)]
pub struct HashedEmbedder {
    dim: usize,
}

impl HashedEmbedder {
    /// Create an embedder with the given dimensionality (minimum 8)
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(8) }
    }
}

impl Default for HashedEmbedder {
    fn default() -> Self {
        Self::new(384)
    }
}

#[async_trait]
impl EmbeddingProvider for HashedEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut v = vec![0.0f32; self.dim];

        for token in text.unicode_words() {
            let token = token.to_lowercase();
            let mut h: u64 = 0xcbf2_9ce4_8422_2325;
            for b in token.as_bytes() {
                h ^= u64::from(*b);
                h = h.wrapping_mul(0x0000_0100_0000_01b3);
            }
            let idx = (h as usize) % self.dim;
            v[idx] += 1.0;
        }

        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut v {
                *x /= norm;
            }
        }

        Ok(v)
    }

    fn dimensions(&self) -> usize {
        self.dim
    }

    fn name(&self) -> &str {
        "hashed-fnv1a"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn embeddings_are_unit_norm() {
        let embedder = HashedEmbedder::new(64);
        let v = embedder.embed("what are your support hours").await.unwrap();
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn embedding_is_deterministic() {
        let embedder = HashedEmbedder::new(64);
        let a = embedder.embed("pricing models").await.unwrap();
        let b = embedder.embed("pricing models").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn shared_tokens_raise_similarity() {
        let embedder = HashedEmbedder::new(128);
        let q = embedder.embed("support hours on friday").await.unwrap();
        let close = embedder
            .embed("support hours are monday to friday")
            .await
            .unwrap();
        let far = embedder.embed("completely unrelated gardening").await.unwrap();

        let dot = |a: &[f32], b: &[f32]| a.iter().zip(b).map(|(x, y)| x * y).sum::<f32>();
        assert!(dot(&q, &close) > dot(&q, &far));
    }

    #[tokio::test]
    async fn empty_text_is_a_zero_vector() {
        let embedder = HashedEmbedder::new(32);
        let v = embedder.embed("").await.unwrap();
        assert!(v.iter().all(|x| *x == 0.0));
    }
}
