//! Embedding provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Trait for mapping text to fixed-dimension unit-norm vectors.
///
/// The same provider (and thus the same model identifier) must be used for
/// corpus and query embedding, or similarity scores are meaningless. The
/// persisted index records the provider name and is rebuilt on mismatch.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed multiple texts.
    ///
    /// Default implementation calls `embed` sequentially, which is fine for a
    /// corpus of tens of documents.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed(text).await?);
        }
        Ok(embeddings)
    }

    /// Embedding dimensionality
    fn dimensions(&self) -> usize;

    /// Stable provider identifier, recorded alongside the persisted index
    fn name(&self) -> &str;
}
