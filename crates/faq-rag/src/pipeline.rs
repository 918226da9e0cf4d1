//! The confidence-gated answering pipeline
//!
//! Wires guard → special cases → deterministic router → retrieval → rerank →
//! gate → generative-or-extractive synthesis, over an immutable index
//! snapshot that is swapped wholesale on rebuild.

use std::collections::BTreeSet;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::RagConfig;
use crate::error::Result;
use crate::generation::{answer_from_chunks, format_context};
use crate::index::{IndexSnapshot, IndexStore};
use crate::providers::{EmbeddingProvider, LlmProvider};
use crate::retrieval::{rerank_chunks, should_fallback, Retriever};
use crate::routing::{is_out_of_scope, match_core_faq, normalize_question, FaqCatalog};
use crate::types::{ChatResponse, IndexStats, ScoredChunk};

const EMPTY_QUESTION_PROMPT: &str = "Please type a question to get started.";

// '24/7' queries get an explicit statement of business hours instead of a
// dump of unrelated SLA details.
const ALWAYS_ON_MARKERS: &[&str] = &["24/7", "24x7"];
const ALWAYS_ON_ANSWER: &str = "The knowledge base lists business hours (Mon–Fri, 09:00–17:00 CET/CEST) and does not mention 24/7 support.";
const ALWAYS_ON_CONFIDENCE: f32 = 0.5;

/// The assembled answering pipeline.
///
/// Everything it holds is read-only per request; `rebuild` is the single
/// mutating operation and publishes a fresh snapshot atomically.
pub struct AnswerPipeline {
    config: RagConfig,
    catalog: FaqCatalog,
    embedder: Arc<dyn EmbeddingProvider>,
    generator: Option<Arc<dyn LlmProvider>>,
    store: IndexStore,
    snapshot: RwLock<Arc<IndexSnapshot>>,
}

impl AnswerPipeline {
    /// Assemble the pipeline, loading (or building) the index snapshot.
    pub async fn new(
        config: RagConfig,
        catalog: FaqCatalog,
        embedder: Arc<dyn EmbeddingProvider>,
        generator: Option<Arc<dyn LlmProvider>>,
    ) -> Result<Self> {
        let store = IndexStore::new(&config.knowledge_base, config.chunking.clone());
        let snapshot = store.load_or_build(embedder.as_ref()).await?;

        Ok(Self {
            config,
            catalog,
            embedder,
            generator,
            store,
            snapshot: RwLock::new(Arc::new(snapshot)),
        })
    }

    /// Current snapshot statistics
    pub fn stats(&self) -> IndexStats {
        self.snapshot.read().stats()
    }

    /// Rebuild the index from the knowledge base and publish the new
    /// snapshot. Readers keep the previous snapshot until the swap.
    pub async fn rebuild(&self) -> Result<IndexStats> {
        let snapshot = self.store.build(self.embedder.as_ref()).await?;
        let stats = snapshot.stats();
        *self.snapshot.write() = Arc::new(snapshot);
        Ok(stats)
    }

    /// Answer a question.
    ///
    /// Never fails for a well-formed question: any internal error is logged
    /// and mapped to the generic fallback response.
    pub async fn answer(&self, question: &str) -> ChatResponse {
        let question = question.trim();

        if question.is_empty() {
            return ChatResponse {
                answer: EMPTY_QUESTION_PROMPT.to_string(),
                sources: Vec::new(),
                confidence: 0.0,
                is_fallback: true,
            };
        }

        match self.answer_inner(question).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Pipeline failure for question \"{}\": {}", question, e);
                ChatResponse::fallback(0.0)
            }
        }
    }

    async fn answer_inner(&self, question: &str) -> Result<ChatResponse> {
        let q_lower = question.to_lowercase();

        if ALWAYS_ON_MARKERS.iter().any(|m| q_lower.contains(m)) {
            return Ok(ChatResponse::answered(
                ALWAYS_ON_ANSWER,
                vec!["support.md".to_string()],
                ALWAYS_ON_CONFIDENCE,
            ));
        }

        if is_out_of_scope(question) {
            tracing::debug!("Out of scope: \"{}\"", question);
            return Ok(ChatResponse::fallback(0.0));
        }

        if let Some(route) = match_core_faq(&self.catalog, question) {
            tracing::debug!(
                "Routed \"{}\" to item {} ({:.2})",
                question,
                route.item.id,
                route.confidence
            );
            return Ok(ChatResponse::from_item(route.item, route.confidence));
        }

        let snapshot = Arc::clone(&self.snapshot.read());
        let retriever = Retriever::new(self.config.retrieval.top_k);
        let (chunks, best_score) = retriever
            .retrieve(&snapshot, self.embedder.as_ref(), &normalize_question(question))
            .await?;
        let chunks = rerank_chunks(question, chunks);

        if should_fallback(
            question,
            &chunks,
            best_score,
            self.config.retrieval.similarity_threshold,
            self.config.retrieval.lexical_threshold,
        ) {
            tracing::debug!(
                "Gate rejected \"{}\" (best score {:.3})",
                question,
                best_score
            );
            return Ok(ChatResponse::fallback(best_score));
        }

        let (answer, sources) = self.synthesize(question, &chunks).await;
        let answer = append_sources_line(answer, &sources);

        Ok(ChatResponse::answered(answer, sources, best_score))
    }

    /// Generative answer when a backend is configured and succeeds,
    /// extractive synthesis otherwise.
    async fn synthesize(&self, question: &str, chunks: &[ScoredChunk]) -> (String, Vec<String>) {
        if let Some(generator) = &self.generator {
            let context = format_context(chunks, self.config.retrieval.context_budget);
            match generator.generate_answer(question, &context).await {
                Ok(answer) if !answer.trim().is_empty() => {
                    let sources: BTreeSet<String> =
                        chunks.iter().map(|c| c.source().to_string()).collect();
                    return (answer, sources.into_iter().collect());
                }
                Ok(_) => {
                    tracing::warn!("Generator returned an empty answer, using extractive path");
                }
                Err(e) => {
                    tracing::warn!("Generator unavailable ({}), using extractive path", e);
                }
            }
        }

        let (answer, used_sources) =
            answer_from_chunks(question, chunks, self.config.retrieval.max_answer_lines);

        if used_sources.is_empty() {
            let sources: BTreeSet<String> = chunks.iter().map(|c| c.source().to_string()).collect();
            (answer, sources.into_iter().collect())
        } else {
            (answer, used_sources)
        }
    }
}

fn append_sources_line(answer: String, sources: &[String]) -> String {
    if answer.is_empty() || sources.is_empty() || answer.contains("\n\nSources:") {
        return answer;
    }
    format!("{}\n\nSources: {}", answer.trim(), sources.join(", "))
}
