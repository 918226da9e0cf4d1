//! Semantic retrieval, lexical gating, and source-aware reranking

mod gate;
mod lexical;
mod rerank;
mod search;

pub use gate::should_fallback;
pub use lexical::{is_latin_text, lexical_overlap_ratio, tokenize};
pub use rerank::rerank_chunks;
pub use search::Retriever;
