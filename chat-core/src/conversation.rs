use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::dispatcher::apology_for;
use crate::errors::{GuardRejection, ResponderError};
use crate::models::{Message, MessageId, RequestState, Role};
use crate::wire::ChatRequest;

/// Ordered messages of one session plus the single in-flight flag.
///
/// Pure state: no I/O happens here. Network calls live in the dispatcher,
/// which drives a turn through [`begin_turn`](Self::begin_turn) and
/// [`complete_turn`](Self::complete_turn).
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    messages: Vec<Message>,
    state: RequestState,
    next_id: u64,
    last_timestamp: Option<DateTime<Utc>>,
    // Bumped by `clear()` so a reply to a wiped conversation can be dropped.
    epoch: u64,
}

/// A turn that passed the guard and is waiting on the responder.
#[derive(Debug)]
#[must_use = "a pending turn must be completed to return the store to idle"]
pub struct PendingTurn {
    request: ChatRequest,
    user_message: MessageId,
    epoch: u64,
}

impl PendingTurn {
    pub fn request(&self) -> &ChatRequest {
        &self.request
    }

    pub fn user_message(&self) -> MessageId {
        self.user_message
    }
}

/// How a completed turn ended up in the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The responder answered; the reply was appended verbatim.
    Replied(Message),
    /// The exchange failed; an apology was appended in its place.
    Failed { reply: Message, error: ResponderError },
    /// The conversation was cleared while the turn was in flight.
    Discarded,
}

impl TurnOutcome {
    /// The assistant message appended by this turn, if any.
    pub fn reply(&self) -> Option<&Message> {
        match self {
            TurnOutcome::Replied(reply) | TurnOutcome::Failed { reply, .. } => Some(reply),
            TurnOutcome::Discarded => None,
        }
    }
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn current_state(&self) -> RequestState {
        self.state
    }

    /// Adds a message to the end and returns it.
    pub fn append(&mut self, role: Role, content: impl Into<String>) -> &Message {
        let id = MessageId(self.next_id);
        self.next_id += 1;

        let now = Utc::now();
        let timestamp = self.last_timestamp.map_or(now, |last| last.max(now));
        self.last_timestamp = Some(timestamp);

        self.messages.push(Message::new(id, role, content.into(), timestamp));
        &self.messages[self.messages.len() - 1]
    }

    /// Empties the conversation. Ids keep counting and an in-flight turn
    /// stays in flight.
    pub fn clear(&mut self) {
        if !self.messages.is_empty() || self.state.is_sending() {
            self.epoch += 1;
        }
        self.messages.clear();
    }

    /// Accepts a user utterance and marks the store as sending.
    ///
    /// The returned request carries the history as it stood before this
    /// utterance. Nothing changes when the guard rejects.
    pub fn begin_turn(&mut self, raw_text: &str) -> Result<PendingTurn, GuardRejection> {
        let text = raw_text.trim();
        if text.is_empty() {
            return Err(GuardRejection::EmptyInput);
        }
        if self.state.is_sending() {
            return Err(GuardRejection::TurnInFlight);
        }

        self.state = RequestState::Sending;
        let request = ChatRequest::new(text, &self.messages);
        let user_message = self.append(Role::User, text).id;
        debug!(%user_message, history = request.history.len(), "Turn started");

        Ok(PendingTurn { request, user_message, epoch: self.epoch })
    }

    /// Folds the responder's result back in and returns the store to idle.
    pub fn complete_turn(
        &mut self,
        pending: PendingTurn,
        reply: Result<String, ResponderError>,
    ) -> TurnOutcome {
        self.state = RequestState::Idle;

        if pending.epoch != self.epoch {
            debug!(user_message = %pending.user_message, "Conversation cleared mid-turn; dropping reply");
            return TurnOutcome::Discarded;
        }

        match reply {
            Ok(text) => TurnOutcome::Replied(self.append(Role::Assistant, text).clone()),
            Err(error) => {
                warn!(user_message = %pending.user_message, "Turn failed: {error}");
                let reply = self.append(Role::Assistant, apology_for(&error)).clone();
                TurnOutcome::Failed { reply, error }
            }
        }
    }
}
