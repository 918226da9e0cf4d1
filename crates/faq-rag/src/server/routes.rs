//! HTTP handlers for chat, reindex, and health

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::error::Result;
use crate::types::{ChatRequest, ChatResponse, ReindexResponse};

use super::state::AppState;

/// POST /chat - answer a question
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    tracing::info!("Question: \"{}\"", request.question.trim());
    let response = state.pipeline().answer(&request.question).await;
    tracing::info!(
        "Answered (fallback: {}, confidence: {:.2})",
        response.is_fallback,
        response.confidence
    );
    Json(response)
}

/// POST /reindex - rebuild the index from the knowledge base
pub async fn reindex(State(state): State<AppState>) -> Result<Json<ReindexResponse>> {
    let stats = state.pipeline().rebuild().await?;
    Ok(Json(ReindexResponse { ok: true, stats }))
}

/// GET /health - liveness check
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}
