use std::sync::Arc;

use chat_core::ChatRequest;
use tracing::info;

use crate::errors::AppError;
use crate::upstream::Upstream;

const MAX_MESSAGE_LENGTH: usize = 8000;

/// Validates chat requests and passes them through to the upstream responder.
#[derive(Clone)]
pub struct RelayService {
    upstream: Arc<Upstream>,
}

impl RelayService {
    pub fn new(upstream: Upstream) -> Self {
        Self { upstream: Arc::new(upstream) }
    }

    pub async fn chat(&self, request: ChatRequest) -> Result<String, AppError> {
        // ── Validation ────────────────────────────────────────────────────────
        if request.message.trim().is_empty() {
            return Err(AppError::EmptyField { field_name: "message".to_string() });
        }
        if request.message.len() > MAX_MESSAGE_LENGTH {
            return Err(AppError::FieldTooLong {
                field_name: "message".to_string(),
                max_length: MAX_MESSAGE_LENGTH,
                actual_length: request.message.len(),
            });
        }

        // ── Relay ─────────────────────────────────────────────────────────────
        info!(history = request.history.len(), "Relaying chat turn");
        let reply = self.upstream.forward(&request).await?;
        Ok(reply)
    }
}
