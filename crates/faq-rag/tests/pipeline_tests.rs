//! End-to-end pipeline tests over a temporary knowledge base

use std::path::Path;
use std::sync::Arc;

use faq_rag::config::{KnowledgeBaseConfig, RagConfig, FALLBACK_MESSAGE};
use faq_rag::pipeline::AnswerPipeline;
use faq_rag::providers::HashedEmbedder;
use faq_rag::routing::FaqCatalog;

fn write_kb(dir: &Path) {
    let kb = dir.join("kb");
    std::fs::create_dir_all(&kb).unwrap();

    std::fs::write(
        kb.join("00_scope.md"),
        "# Scope\n\nBoundary notes that must never be retrieved.",
    )
    .unwrap();

    std::fs::write(
        kb.join("services.md"),
        "# Services\n\nWe build web applications, mobile applications, and MVPs for startups.\n\nEvery engagement starts with a Discovery session, a 90-minute workshop.",
    )
    .unwrap();

    std::fs::write(
        kb.join("pricing.md"),
        "# Pricing & Payments\n\nWe work in two pricing models: Fixed Price and Time & Materials.\n\nFixed Price projects are billed in milestones: 40% upfront, 40% at the mid-project milestone, and 20% on delivery. Invoices are due within 14 days.\n\nIndicative ranges start at €8,000 for small MVPs.",
    )
    .unwrap();

    std::fs::write(
        kb.join("support.md"),
        "# Support & SLA\n\nSupport hours: Mon-Fri, 09:00-17:00 CET/CEST, excluding public holidays.\n\nSeverity 1 (critical outage): first response within 2 business hours.",
    )
    .unwrap();

    std::fs::write(
        kb.join("policies.md"),
        "# Policies\n\nMeetings can be rescheduled free of charge with at least 24 hours notice.\n\nCompleted milestones are non-refundable; we refund the remainder of a cancelled milestone payment within 14 days.",
    )
    .unwrap();
}

fn test_config(dir: &Path, similarity_threshold: f32) -> RagConfig {
    let mut config = RagConfig::default();
    config.knowledge_base = KnowledgeBaseConfig {
        kb_dir: dir.join("kb"),
        cache_dir: dir.join("cache"),
        catalog_path: None,
    };
    config.retrieval.similarity_threshold = similarity_threshold;
    config
}

async fn pipeline_with_threshold(dir: &Path, similarity_threshold: f32) -> AnswerPipeline {
    write_kb(dir);
    let config = test_config(dir, similarity_threshold);
    let catalog = FaqCatalog::load_default().unwrap();
    let embedder = Arc::new(HashedEmbedder::new(128));
    AnswerPipeline::new(config, catalog, embedder, None)
        .await
        .unwrap()
}

#[tokio::test]
async fn sla_question_routes_to_the_reference_answer() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline_with_threshold(dir.path(), 0.40).await;

    let response = pipeline
        .answer("What is your SLA for a critical outage (Severity 1)?")
        .await;

    let catalog = FaqCatalog::load_default().unwrap();
    let item = catalog
        .items()
        .iter()
        .find(|i| i.id == 9)
        .expect("SLA item");

    assert!(!response.is_fallback);
    assert_eq!(response.answer, item.reference_answer.trim());
    assert_eq!(response.sources, item.sources);
    assert!((response.confidence - 1.0).abs() < f32::EPSILON);
}

#[tokio::test]
async fn bitcoin_question_is_rejected_by_the_scope_guard() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline_with_threshold(dir.path(), 0.40).await;

    let response = pipeline.answer("what's the price of bitcoin today").await;

    assert!(response.is_fallback);
    assert_eq!(response.answer, FALLBACK_MESSAGE);
    assert!(response.sources.is_empty());
    assert_eq!(response.confidence, 0.0);
}

#[tokio::test]
async fn nda_drafting_is_rejected_but_nda_signing_is_routed() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline_with_threshold(dir.path(), 0.40).await;

    let drafting = pipeline.answer("draft an NDA for us").await;
    assert!(drafting.is_fallback);
    assert_eq!(drafting.confidence, 0.0);

    let signing = pipeline.answer("Can we sign an NDA?").await;
    assert!(!signing.is_fallback);
    assert!(signing.answer.to_lowercase().contains("nda"));
}

#[tokio::test]
async fn always_on_support_question_gets_the_business_hours_answer() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline_with_threshold(dir.path(), 0.40).await;

    let response = pipeline.answer("24/7 support?").await;

    assert!(!response.is_fallback);
    assert!(response.answer.contains("business hours"));
    assert_eq!(response.sources, vec!["support.md".to_string()]);
    assert!((response.confidence - 0.5).abs() < f32::EPSILON);
}

#[tokio::test]
async fn unrelated_question_falls_back_with_its_low_best_score() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline_with_threshold(dir.path(), 0.40).await;

    let response = pipeline.answer("how do I grow tomatoes in winter").await;

    assert!(response.is_fallback);
    assert_eq!(response.answer, FALLBACK_MESSAGE);
    assert!(response.sources.is_empty());
    assert!(response.confidence < 0.40);
}

#[tokio::test]
async fn empty_question_gets_the_typed_prompt() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline_with_threshold(dir.path(), 0.40).await;

    let response = pipeline.answer("   ").await;

    assert!(response.is_fallback);
    assert_eq!(response.confidence, 0.0);
    assert!(response.answer.contains("type a question"));
}

#[tokio::test]
async fn unrouted_question_with_evidence_gets_an_extractive_answer() {
    let dir = tempfile::tempdir().unwrap();
    // Threshold lowered to what the hashed embedder produces for a genuine
    // token overlap between a short question and a paragraph-sized chunk.
    let pipeline = pipeline_with_threshold(dir.path(), 0.02).await;

    let response = pipeline.answer("how are milestones invoiced?").await;

    assert!(!response.is_fallback, "expected an answer: {response:?}");
    assert!(response.answer.contains("40%"));
    assert!(response
        .sources
        .iter()
        .any(|s| s == "pricing.md"));
    assert!(response.answer.contains("Sources:"));
}

#[tokio::test]
async fn rebuild_is_idempotent_and_keeps_alignment() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline_with_threshold(dir.path(), 0.40).await;

    let first = pipeline.rebuild().await.unwrap();
    let second = pipeline.rebuild().await.unwrap();

    assert_eq!(first, second);
    assert!(first.chunks > 0);
    assert_eq!(first.docs, 4); // 00_scope.md is excluded
    assert_eq!(pipeline.stats(), second);
}

#[tokio::test]
async fn second_pipeline_loads_the_persisted_index() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline_with_threshold(dir.path(), 0.40).await;
    let stats = pipeline.stats();

    // Same directories, fresh pipeline: must load, not rebuild differently.
    let config = test_config(dir.path(), 0.40);
    let catalog = FaqCatalog::load_default().unwrap();
    let embedder = Arc::new(HashedEmbedder::new(128));
    let reloaded = AnswerPipeline::new(config, catalog, embedder, None)
        .await
        .unwrap();

    assert_eq!(reloaded.stats(), stats);
}
