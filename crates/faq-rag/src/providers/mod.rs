//! Provider abstractions for embeddings and answer generation
//!
//! Trait-based seams so the pipeline can run fully offline (hashed embedder,
//! no generator) or against a local Ollama server.

pub mod embedding;
pub mod hashed;
pub mod llm;
pub mod ollama;

pub use embedding::EmbeddingProvider;
pub use hashed::HashedEmbedder;
pub use llm::LlmProvider;
pub use ollama::{OllamaClient, OllamaEmbedder, OllamaGenerator};
