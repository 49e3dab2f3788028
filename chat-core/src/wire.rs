//! JSON bodies exchanged with the responder endpoint, and the helpers that
//! turn raw HTTP results into [`ResponderError`]s.

use serde::{Deserialize, Serialize};

use crate::errors::ResponderError;
use crate::models::{Message, Role};

/// Outbound body: the latest utterance plus everything said before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

/// A history item carries only what the responder needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub content: String,
    pub role: Role,
}

impl From<&Message> for HistoryEntry {
    fn from(m: &Message) -> Self {
        Self { content: m.content.clone(), role: m.role }
    }
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, history: &[Message]) -> Self {
        Self {
            message: message.into(),
            history: history.iter().map(HistoryEntry::from).collect(),
        }
    }
}

/// Success body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

/// Failure body. Every field is optional; senders fill whichever they know.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    /// First non-blank of `detail`, then `details`.
    pub fn best_detail(&self) -> Option<&str> {
        [self.detail.as_deref(), self.details.as_deref()]
            .into_iter()
            .flatten()
            .find(|d| !d.trim().is_empty())
    }
}

// Lenient view of a success body so a missing `response` is distinguishable
// from a body that is not JSON at all.
#[derive(Deserialize)]
struct RawReply {
    #[serde(default)]
    response: Option<String>,
}

/// Decodes a 2xx body into the reply text.
pub fn reply_from_body(body: &str) -> Result<String, ResponderError> {
    let raw: RawReply = serde_json::from_str(body)
        .map_err(|e| ResponderError::MalformedBody(e.to_string()))?;
    raw.response.ok_or(ResponderError::ContractViolation)
}

/// Builds the error for a non-2xx answer.
///
/// The detail is the first of `detail`, `details`, or the status text that
/// is present; a body that does not parse is ignored.
pub fn failure_from_status(status: u16, status_text: &str, body: &str) -> ResponderError {
    let parsed = serde_json::from_str::<ErrorBody>(body).unwrap_or_default();
    let detail = parsed
        .best_detail()
        .map(str::to_string)
        .or_else(|| {
            let text = status_text.trim();
            (!text.is_empty()).then(|| text.to_string())
        });
    ResponderError::Status { status, detail }
}
