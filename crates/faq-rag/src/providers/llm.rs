//! Generative answer provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Trait for LLM-based answer generation.
///
/// The pipeline treats an `Err` and an empty answer identically: both fall
/// back to extractive synthesis, and neither is surfaced to the caller.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate an answer given the question and a source-tagged context
    async fn generate_answer(&self, question: &str, context: &str) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model identifier being used
    fn model(&self) -> &str;
}
