//! Knowledge base loading and text chunking

mod chunker;
mod loader;

pub use chunker::TextChunker;
pub use loader::{clean_text, read_kb_files};
