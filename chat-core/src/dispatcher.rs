use async_trait::async_trait;
use tracing::{debug, error};

use crate::conversation::{ConversationStore, TurnOutcome};
use crate::errors::{GuardRejection, ResponderError};
use crate::wire::ChatRequest;

const APOLOGY_PREFIX: &str = "Sorry, I'm having trouble connecting to the server.";
const APOLOGY_FALLBACK: &str = "Please try again later.";

/// The external service that turns one request into one reply.
///
/// Futures are not required to be `Send` so a browser fetch client can
/// implement this directly.
#[async_trait(?Send)]
pub trait Responder {
    async fn respond(&self, request: &ChatRequest) -> Result<String, ResponderError>;
}

/// Text appended in place of a reply when the exchange fails.
pub fn apology_for(err: &ResponderError) -> String {
    format!("{APOLOGY_PREFIX} {}", err.detail().unwrap_or(APOLOGY_FALLBACK))
}

/// Runs user turns against a [`Responder`], one at a time.
#[derive(Debug, Clone)]
pub struct TurnDispatcher<R> {
    responder: R,
}

impl<R: Responder> TurnDispatcher<R> {
    pub fn new(responder: R) -> Self {
        Self { responder }
    }

    pub fn responder(&self) -> &R {
        &self.responder
    }

    /// One round-trip to the responder. No retries.
    pub async fn exchange(&self, request: &ChatRequest) -> Result<String, ResponderError> {
        debug!(history = request.history.len(), "Sending turn to responder");
        let result = self.responder.respond(request).await;
        if let Err(e) = &result {
            error!("Responder call failed: {e}");
        }
        result
    }

    /// Submits `raw_text` and waits for the turn to finish.
    ///
    /// On `Ok`, the store has gained exactly one user and one assistant
    /// message and is idle again. `Err` means the guard refused the input and
    /// the store is unchanged.
    pub async fn submit(
        &self,
        store: &mut ConversationStore,
        raw_text: &str,
    ) -> Result<TurnOutcome, GuardRejection> {
        let pending = store.begin_turn(raw_text)?;
        let reply = self.exchange(pending.request()).await;
        Ok(store.complete_turn(pending, reply))
    }
}
