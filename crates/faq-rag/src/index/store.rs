//! Index persistence: build, atomic publish, and load

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{ChunkingConfig, KnowledgeBaseConfig};
use crate::error::{Error, Result};
use crate::index::FlatIpIndex;
use crate::ingestion::{clean_text, read_kb_files, TextChunker};
use crate::providers::EmbeddingProvider;
use crate::types::{Chunk, IndexStats};

/// An immutable, loaded index: the vector index plus the positionally aligned
/// chunk list. Shared behind an `Arc` and replaced wholesale on rebuild.
#[derive(Debug)]
pub struct IndexSnapshot {
    /// Exact inner-product index
    pub index: FlatIpIndex,
    /// Chunk metadata; entry `i` matches vector `i`
    pub chunks: Vec<Chunk>,
    /// Name of the embedding provider the vectors came from
    pub model: String,
}

impl IndexSnapshot {
    /// Build summary statistics for this snapshot
    pub fn stats(&self) -> IndexStats {
        let docs = {
            let mut sources: Vec<&str> = self.chunks.iter().map(|c| c.source.as_str()).collect();
            sources.sort_unstable();
            sources.dedup();
            sources.len()
        };
        IndexStats {
            docs,
            chunks: self.chunks.len(),
            dim: self.index.dim(),
        }
    }
}

/// On-disk form of the vector index
#[derive(Serialize, Deserialize)]
struct PersistedIndex {
    version: u32,
    model: String,
    built_at: DateTime<Utc>,
    index: FlatIpIndex,
}

const INDEX_FORMAT_VERSION: u32 = 1;

/// Builds, persists, and loads the index artifacts.
///
/// Two co-located files are maintained: the vector index and the chunk list.
/// Both are written to temporary files and renamed into place only after both
/// writes succeed, so concurrent readers never observe a half-written pair.
pub struct IndexStore {
    kb_dir: PathBuf,
    index_path: PathBuf,
    chunks_path: PathBuf,
    chunking: ChunkingConfig,
}

impl IndexStore {
    /// Create a store over the configured locations
    pub fn new(kb: &KnowledgeBaseConfig, chunking: ChunkingConfig) -> Self {
        Self {
            kb_dir: kb.kb_dir.clone(),
            index_path: kb.index_path(),
            chunks_path: kb.chunks_path(),
            chunking,
        }
    }

    /// Read, chunk, and embed the knowledge base, then persist the artifacts.
    pub async fn build(&self, embedder: &dyn EmbeddingProvider) -> Result<IndexSnapshot> {
        let docs = read_kb_files(&self.kb_dir)?;
        let chunker = TextChunker::new(self.chunking.max_chars, self.chunking.overlap);

        let mut chunks: Vec<Chunk> = Vec::new();
        for (name, content) in &docs {
            for text in chunker.chunk(&clean_text(content)) {
                chunks.push(Chunk::new(text, name.clone()));
            }
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = embedder.embed_batch(&texts).await?;

        let mut index = FlatIpIndex::new(embedder.dimensions());
        for embedding in &embeddings {
            index.add(embedding)?;
        }

        let snapshot = IndexSnapshot {
            index,
            chunks,
            model: embedder.name().to_string(),
        };

        self.persist(&snapshot)?;

        let stats = snapshot.stats();
        tracing::info!(
            "Index built: {} docs, {} chunks, dim {}",
            stats.docs,
            stats.chunks,
            stats.dim
        );

        Ok(snapshot)
    }

    /// Load the persisted snapshot, or `None` when either artifact is absent
    /// or was produced by a different embedding provider.
    pub fn load(&self, embedder: &dyn EmbeddingProvider) -> Result<Option<IndexSnapshot>> {
        if !self.index_path.exists() || !self.chunks_path.exists() {
            return Ok(None);
        }

        let persisted: PersistedIndex =
            serde_json::from_str(&std::fs::read_to_string(&self.index_path)?)?;
        let chunks: Vec<Chunk> = serde_json::from_str(&std::fs::read_to_string(&self.chunks_path)?)?;

        if persisted.version != INDEX_FORMAT_VERSION {
            tracing::warn!(
                "Index format version {} is outdated, rebuilding",
                persisted.version
            );
            return Ok(None);
        }

        if persisted.model != embedder.name() || persisted.index.dim() != embedder.dimensions() {
            tracing::warn!(
                "Embedding space changed ('{}' dim {} -> '{}' dim {}), rebuilding",
                persisted.model,
                persisted.index.dim(),
                embedder.name(),
                embedder.dimensions()
            );
            return Ok(None);
        }

        if persisted.index.len() != chunks.len() {
            return Err(Error::index(format!(
                "index/metadata misalignment: {} vectors vs {} chunks",
                persisted.index.len(),
                chunks.len()
            )));
        }

        Ok(Some(IndexSnapshot {
            index: persisted.index,
            chunks,
            model: persisted.model,
        }))
    }

    /// Load the snapshot, building it first when nothing usable is persisted.
    pub async fn load_or_build(&self, embedder: &dyn EmbeddingProvider) -> Result<IndexSnapshot> {
        match self.load(embedder)? {
            Some(snapshot) => {
                tracing::info!("Loaded index with {} chunks", snapshot.chunks.len());
                Ok(snapshot)
            }
            None => self.build(embedder).await,
        }
    }

    /// Write both artifacts, publishing them atomically.
    fn persist(&self, snapshot: &IndexSnapshot) -> Result<()> {
        let cache_dir = self
            .index_path
            .parent()
            .ok_or_else(|| Error::index("index path has no parent directory"))?;
        std::fs::create_dir_all(cache_dir)?;

        let persisted = PersistedIndex {
            version: INDEX_FORMAT_VERSION,
            model: snapshot.model.clone(),
            built_at: Utc::now(),
            index: snapshot.index.clone(),
        };

        let index_tmp = write_temp(cache_dir, &serde_json::to_vec(&persisted)?)?;
        let chunks_tmp = write_temp(cache_dir, &serde_json::to_vec_pretty(&snapshot.chunks)?)?;

        // Both writes succeeded; now expose them.
        index_tmp
            .persist(&self.index_path)
            .map_err(|e| Error::index(format!("failed to publish index: {}", e.error)))?;
        chunks_tmp
            .persist(&self.chunks_path)
            .map_err(|e| Error::index(format!("failed to publish chunks: {}", e.error)))?;

        Ok(())
    }
}

fn write_temp(dir: &Path, data: &[u8]) -> Result<tempfile::NamedTempFile> {
    use std::io::Write;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    Ok(tmp)
}
