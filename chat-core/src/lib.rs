//! Turn-exchange core shared by the relay service and the browser widget.
//!
//! A [`ConversationStore`] holds the session's messages and the single
//! in-flight flag; a [`TurnDispatcher`] runs one user turn against a
//! [`Responder`] and folds the result back into the store.

pub mod conversation;
pub mod demo;
pub mod dispatcher;
pub mod errors;
pub mod models;
pub mod wire;

pub use conversation::{ConversationStore, PendingTurn, TurnOutcome};
pub use demo::KeywordResponder;
pub use dispatcher::{Responder, TurnDispatcher, apology_for};
pub use errors::{GuardRejection, ResponderError};
pub use models::{Message, MessageId, RequestState, Role};
pub use wire::{ChatReply, ChatRequest, ErrorBody, HistoryEntry};
