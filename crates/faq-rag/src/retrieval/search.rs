//! Query-time retrieval over the loaded index

use crate::error::Result;
use crate::index::IndexSnapshot;
use crate::providers::EmbeddingProvider;
use crate::types::ScoredChunk;

/// Embeds a query and runs exact top-K search over an index snapshot.
pub struct Retriever {
    top_k: usize,
}

impl Retriever {
    /// Create a retriever returning up to `top_k` chunks per query
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    /// Retrieve the best-matching chunks for `query`.
    ///
    /// Returns the scored chunks plus the single best similarity, which the
    /// gate consumes separately. An empty index yields `(vec![], 0.0)`.
    pub async fn retrieve(
        &self,
        snapshot: &IndexSnapshot,
        embedder: &dyn EmbeddingProvider,
        query: &str,
    ) -> Result<(Vec<ScoredChunk>, f32)> {
        let query_embedding = embedder.embed(query).await?;
        let hits = snapshot.index.search(&query_embedding, self.top_k);

        let best = hits.first().map(|(_, score)| *score).unwrap_or(0.0);
        let results = hits
            .into_iter()
            .map(|(i, score)| ScoredChunk {
                chunk: snapshot.chunks[i].clone(),
                score,
            })
            .collect();

        Ok((results, best))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::FlatIpIndex;
    use crate::providers::HashedEmbedder;
    use crate::types::Chunk;

    async fn snapshot_of(texts: &[(&str, &str)], embedder: &HashedEmbedder) -> IndexSnapshot {
        let mut index = FlatIpIndex::new(embedder.dimensions());
        let mut chunks = Vec::new();
        for (text, source) in texts {
            let v = embedder.embed(text).await.unwrap();
            index.add(&v).unwrap();
            chunks.push(Chunk::new(*text, *source));
        }
        IndexSnapshot {
            index,
            chunks,
            model: embedder.name().to_string(),
        }
    }

    #[tokio::test]
    async fn retrieve_returns_best_score_and_matching_chunk() {
        let embedder = HashedEmbedder::new(128);
        let snapshot = snapshot_of(
            &[
                ("support hours are monday to friday", "support.md"),
                ("fixed price milestones and payments", "pricing.md"),
            ],
            &embedder,
        )
        .await;

        let retriever = Retriever::new(4);
        let (results, best) = retriever
            .retrieve(&snapshot, &embedder, "when are your support hours")
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].source(), "support.md");
        assert!((best - results[0].score).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn empty_index_yields_no_results() {
        let embedder = HashedEmbedder::new(64);
        let snapshot = IndexSnapshot {
            index: FlatIpIndex::new(64),
            chunks: Vec::new(),
            model: embedder.name().to_string(),
        };

        let retriever = Retriever::new(4);
        let (results, best) = retriever
            .retrieve(&snapshot, &embedder, "anything")
            .await
            .unwrap();

        assert!(results.is_empty());
        assert_eq!(best, 0.0);
    }
}
