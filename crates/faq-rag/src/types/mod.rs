//! Core types for the FAQ pipeline

pub mod chunk;
pub mod faq;
pub mod query;
pub mod response;

pub use chunk::{Chunk, ScoredChunk};
pub use faq::CoreFaqItem;
pub use query::ChatRequest;
pub use response::{ChatResponse, IndexStats, ReindexResponse};
