//! Application state for the FAQ server

use std::sync::Arc;

use crate::config::{EmbeddingBackend, RagConfig};
use crate::error::Result;
use crate::pipeline::AnswerPipeline;
use crate::providers::{
    EmbeddingProvider, HashedEmbedder, LlmProvider, OllamaEmbedder, OllamaGenerator,
};
use crate::routing::FaqCatalog;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pipeline: AnswerPipeline,
}

impl AppState {
    /// Build providers from the configuration and assemble the pipeline.
    pub async fn new(config: RagConfig) -> Result<Self> {
        let catalog = match &config.knowledge_base.catalog_path {
            Some(path) => FaqCatalog::from_path(path)?,
            None => FaqCatalog::load_default()?,
        };
        tracing::info!("Catalog loaded with {} reference items", catalog.items().len());

        let embedder: Arc<dyn EmbeddingProvider> = match config.embeddings.backend {
            EmbeddingBackend::Hashed => {
                Arc::new(HashedEmbedder::new(config.embeddings.dimensions))
            }
            EmbeddingBackend::Ollama => Arc::new(OllamaEmbedder::new(
                &config.llm,
                config.embeddings.dimensions,
            )?),
        };
        tracing::info!("Embedding provider: {}", embedder.name());

        let generator: Option<Arc<dyn LlmProvider>> = if config.llm.generation_enabled() {
            let generator = OllamaGenerator::new(&config.llm)?;
            tracing::info!("Generative backend: {} ({})", generator.name(), generator.model());
            Some(Arc::new(generator))
        } else {
            tracing::info!("No generative backend configured, extractive answers only");
            None
        };

        let pipeline = AnswerPipeline::new(config, catalog, embedder, generator).await?;
        let stats = pipeline.stats();
        tracing::info!(
            "Index ready: {} docs, {} chunks, dim {}",
            stats.docs,
            stats.chunks,
            stats.dim
        );

        Ok(Self {
            inner: Arc::new(AppStateInner { pipeline }),
        })
    }

    /// The answering pipeline
    pub fn pipeline(&self) -> &AnswerPipeline {
        &self.inner.pipeline
    }
}
