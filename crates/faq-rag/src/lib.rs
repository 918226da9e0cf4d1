//! faq-rag: FAQ chatbot with a confidence-gated hybrid answering pipeline
//!
//! Questions are answered against a small, fixed knowledge base by combining
//! deterministic routing over a curated catalog with vector-similarity
//! retrieval, lexical-overlap gating, source-aware reranking, and extractive
//! (or optionally generative) answer synthesis.

pub mod config;
pub mod error;
pub mod generation;
pub mod index;
pub mod ingestion;
pub mod pipeline;
pub mod providers;
pub mod retrieval;
pub mod routing;
pub mod server;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use pipeline::AnswerPipeline;
pub use types::{ChatRequest, ChatResponse, Chunk, CoreFaqItem, IndexStats, ScoredChunk};
