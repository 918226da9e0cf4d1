//! FAQ server binary
//!
//! Run with: cargo run -p faq-rag --bin faq-rag-server

use faq_rag::{config::RagConfig, server::RagServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "faq_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RagConfig::load()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Knowledge base: {}", config.knowledge_base.kb_dir.display());
    tracing::info!("  - Embedding backend: {:?}", config.embeddings.backend);
    tracing::info!("  - Top-K: {}", config.retrieval.top_k);
    tracing::info!(
        "  - Similarity threshold: {}",
        config.retrieval.similarity_threshold
    );

    if config.llm.generation_enabled() {
        tracing::info!("Checking Ollama at {}...", config.llm.base_url);
        let client = reqwest::Client::new();
        match client
            .get(format!("{}/api/tags", config.llm.base_url))
            .send()
            .await
        {
            Ok(resp) if resp.status().is_success() => {
                tracing::info!("Ollama is running");
            }
            _ => {
                tracing::warn!("Ollama not available at {}", config.llm.base_url);
                tracing::warn!("Answers will fall back to extractive synthesis");
            }
        }
    }

    let server = RagServer::new(config).await?;

    println!("\nServer starting on http://{}", server.address());
    println!("Endpoints:");
    println!("  POST /chat     - Ask a question");
    println!("  POST /reindex  - Rebuild the index");
    println!("  GET  /health   - Liveness check");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
