use thiserror::Error;

/// A submission the store refused before anything was appended.
///
/// Never shown to the user; the caller simply does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GuardRejection {
    #[error("Input is empty or whitespace-only")]
    EmptyInput,

    #[error("A turn is already in flight")]
    TurnInFlight,
}

/// Why the responder produced no usable reply.
///
/// Every variant is recovered locally by turning it into an apology message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponderError {
    // ── Transport ───────────────────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("The request timed out")]
    Timeout,

    #[error("{}", status_message(.status, .detail))]
    Status { status: u16, detail: Option<String> },

    #[error("Malformed response body: {0}")]
    MalformedBody(String),

    // ── Collaborator contract ───────────────────────────────────────────────
    #[error("Response body is missing the 'response' field")]
    ContractViolation,
}

fn status_message(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!("Backend error: {detail}"),
        None => format!("Backend responded with status {status}"),
    }
}

impl ResponderError {
    /// Human-readable detail worth showing in the apology, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ResponderError::Network(msg) => Some(msg.as_str()),
            ResponderError::Timeout => Some("The request timed out."),
            ResponderError::Status { detail, .. } => detail.as_deref(),
            ResponderError::MalformedBody(_) | ResponderError::ContractViolation => None,
        }
    }

    pub fn is_contract_violation(&self) -> bool {
        matches!(self, ResponderError::ContractViolation)
    }
}
