//! End-to-end turn exchange against a scripted responder.

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use chat_core::{
    ChatRequest, ConversationStore, GuardRejection, RequestState, Responder, ResponderError, Role,
    TurnDispatcher, TurnOutcome, wire,
};
use proptest::prelude::*;

/// Responder that replays queued results and records every request.
#[derive(Default)]
struct MockResponder {
    replies: RefCell<VecDeque<Result<String, ResponderError>>>,
    requests: RefCell<Vec<ChatRequest>>,
}

impl MockResponder {
    fn queue_reply(&self, text: &str) {
        self.replies.borrow_mut().push_back(Ok(text.to_string()));
    }

    fn queue_error(&self, err: ResponderError) {
        self.replies.borrow_mut().push_back(Err(err));
    }

    fn recorded_requests(&self) -> Vec<ChatRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Responder for MockResponder {
    async fn respond(&self, request: &ChatRequest) -> Result<String, ResponderError> {
        self.requests.borrow_mut().push(request.clone());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ResponderError::Network("No mock reply queued".into())))
    }
}

/// Echoes the message back, for ordering checks.
struct EchoResponder;

#[async_trait(?Send)]
impl Responder for EchoResponder {
    async fn respond(&self, request: &ChatRequest) -> Result<String, ResponderError> {
        Ok(format!("echo:{}", request.message))
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread().build().unwrap()
}

#[tokio::test]
async fn successful_turn_appends_user_then_reply() {
    let mock = MockResponder::default();
    mock.queue_reply("Hi");
    let dispatcher = TurnDispatcher::new(mock);
    let mut store = ConversationStore::new();

    let outcome = dispatcher.submit(&mut store, "hello").await.unwrap();

    assert_eq!(store.len(), 2);
    assert_eq!(store.current_state(), RequestState::Idle);
    assert_eq!(store.messages()[0].role, Role::User);
    assert_eq!(store.messages()[0].content, "hello");
    assert_eq!(store.messages()[1].role, Role::Assistant);
    assert_eq!(store.messages()[1].content, "Hi");
    assert!(matches!(outcome, TurnOutcome::Replied(ref m) if m.content == "Hi"));
}

#[tokio::test]
async fn status_failure_detail_reaches_the_apology() {
    let mock = MockResponder::default();
    mock.queue_error(wire::failure_from_status(
        500,
        "Internal Server Error",
        r#"{"detail":"boom"}"#,
    ));
    let dispatcher = TurnDispatcher::new(mock);
    let mut store = ConversationStore::new();

    let outcome = dispatcher.submit(&mut store, "hello").await.unwrap();

    assert_eq!(store.len(), 2);
    assert_eq!(store.current_state(), RequestState::Idle);
    let reply = &store.messages()[1];
    assert_eq!(reply.role, Role::Assistant);
    assert!(reply.content.contains("boom"), "got {:?}", reply.content);
    assert!(matches!(outcome, TurnOutcome::Failed { .. }));
}

#[tokio::test]
async fn missing_response_field_becomes_apology() {
    let mock = MockResponder::default();
    mock.queue_error(wire::reply_from_body(r#"{"unexpected":true}"#).unwrap_err());
    let dispatcher = TurnDispatcher::new(mock);
    let mut store = ConversationStore::new();

    let outcome = dispatcher.submit(&mut store, "hello").await.unwrap();

    let reply = outcome.reply().unwrap();
    assert!(reply.content.starts_with("Sorry"));
    assert!(!reply.content.contains("null"));
    assert!(matches!(
        outcome,
        TurnOutcome::Failed { error: ResponderError::ContractViolation, .. }
    ));
}

#[tokio::test]
async fn network_error_is_recovered_into_a_message() {
    let mock = MockResponder::default();
    mock.queue_error(ResponderError::Network("Failed to fetch".into()));
    let dispatcher = TurnDispatcher::new(mock);
    let mut store = ConversationStore::new();

    dispatcher.submit(&mut store, "hello").await.unwrap();

    assert_eq!(
        store.messages()[1].content,
        "Sorry, I'm having trouble connecting to the server. Failed to fetch"
    );
}

#[tokio::test]
async fn empty_input_is_rejected_without_calling_responder() {
    let dispatcher = TurnDispatcher::new(MockResponder::default());
    let mut store = ConversationStore::new();

    let err = dispatcher.submit(&mut store, "   ").await.unwrap_err();

    assert_eq!(err, GuardRejection::EmptyInput);
    assert!(store.is_empty());
    assert!(dispatcher.responder().recorded_requests().is_empty());
}

#[tokio::test]
async fn history_excludes_the_new_utterance() {
    let mock = MockResponder::default();
    mock.queue_reply("first reply");
    mock.queue_reply("second reply");
    let dispatcher = TurnDispatcher::new(mock);
    let mut store = ConversationStore::new();

    dispatcher.submit(&mut store, "first").await.unwrap();
    dispatcher.submit(&mut store, "second").await.unwrap();

    let requests = dispatcher.responder().recorded_requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].history.is_empty());
    assert_eq!(requests[1].message, "second");
    let roles: Vec<Role> = requests[1].history.iter().map(|h| h.role).collect();
    assert_eq!(roles, vec![Role::User, Role::Assistant]);
    assert_eq!(requests[1].history[1].content, "first reply");
}

#[tokio::test]
async fn submission_while_sending_is_rejected() {
    let dispatcher = TurnDispatcher::new(EchoResponder);
    let mut store = ConversationStore::new();

    let pending = store.begin_turn("first").unwrap();
    let before = store.len();
    assert_eq!(store.begin_turn("second").unwrap_err(), GuardRejection::TurnInFlight);
    assert_eq!(store.len(), before);

    let reply = dispatcher.exchange(pending.request()).await;
    let outcome = store.complete_turn(pending, reply);
    assert_eq!(outcome.reply().unwrap().content, "echo:first");
    assert_eq!(store.current_state(), RequestState::Idle);

    // Guard is open again once the turn lands.
    dispatcher.submit(&mut store, "second").await.unwrap();
    assert_eq!(store.len(), 4);
}

#[tokio::test]
async fn clear_empties_any_conversation() {
    let dispatcher = TurnDispatcher::new(EchoResponder);
    let mut store = ConversationStore::new();
    for text in ["a", "b", "c"] {
        dispatcher.submit(&mut store, text).await.unwrap();
    }
    assert_eq!(store.len(), 6);

    store.clear();
    assert!(store.is_empty());
    store.clear();
    assert!(store.is_empty());
}

#[tokio::test]
async fn reply_arriving_after_clear_is_dropped_quietly() {
    let dispatcher = TurnDispatcher::new(EchoResponder);
    let mut store = ConversationStore::new();

    let pending = store.begin_turn("hello").unwrap();
    store.clear();
    let reply = dispatcher.exchange(pending.request()).await;
    let outcome = store.complete_turn(pending, reply);

    assert_eq!(outcome, TurnOutcome::Discarded);
    assert!(store.is_empty());
    assert_eq!(store.current_state(), RequestState::Idle);
}

proptest! {
    #[test]
    fn sequential_turns_alternate_user_and_assistant(
        inputs in prop::collection::vec("[a-z]{1,12}", 1..8)
    ) {
        let rt = runtime();
        let dispatcher = TurnDispatcher::new(EchoResponder);
        let mut store = ConversationStore::new();

        for input in &inputs {
            rt.block_on(dispatcher.submit(&mut store, input)).unwrap();
            prop_assert_eq!(store.current_state(), RequestState::Idle);
        }

        prop_assert_eq!(store.len(), inputs.len() * 2);
        for (i, input) in inputs.iter().enumerate() {
            let user = &store.messages()[2 * i];
            let reply = &store.messages()[2 * i + 1];
            prop_assert_eq!(user.role, Role::User);
            prop_assert_eq!(&user.content, input);
            prop_assert_eq!(reply.role, Role::Assistant);
            prop_assert_eq!(reply.content.clone(), format!("echo:{input}"));
        }

        let ids: Vec<_> = store.messages().iter().map(|m| m.id).collect();
        prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(store.messages().windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn whitespace_only_input_never_changes_the_conversation(
        input in "[ \t\r\n]{0,10}"
    ) {
        let rt = runtime();
        let dispatcher = TurnDispatcher::new(EchoResponder);
        let mut store = ConversationStore::new();
        rt.block_on(dispatcher.submit(&mut store, "seed")).unwrap();

        let result = rt.block_on(dispatcher.submit(&mut store, &input));
        prop_assert_eq!(result.unwrap_err(), GuardRejection::EmptyInput);
        prop_assert_eq!(store.len(), 2);
    }
}
