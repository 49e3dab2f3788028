use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use chat_core::{ChatReply, ChatRequest};
use serde::Serialize;

use crate::errors::AppError;
use crate::service::relay_service::RelayService;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// POST `/api/chat` — relays `{message, history}` and answers `{response}`
pub async fn chat_handler(
    State(svc): State<RelayService>,
    Json(request): Json<ChatRequest>,
) -> Response {
    match svc.chat(request).await {
        Ok(response) => Json(ChatReply { response }).into_response(),
        Err(err) => error_response(err),
    }
}

/// GET `/health` — liveness probe
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// ── Helper ────────────────────────────────────────────────────────────────────

fn error_response(err: AppError) -> Response {
    if err.is_validation() {
        tracing::debug!("Rejected chat request: {err}");
    } else {
        tracing::error!("Error in chat relay: {err}");
    }
    err.into_response()
}
