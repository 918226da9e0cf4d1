//! Answer construction: generative context/prompt and extractive synthesis

mod context;
mod extractive;

pub use context::{build_prompt, format_context};
pub use extractive::answer_from_chunks;
