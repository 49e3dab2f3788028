use chat_core::{ConversationStore, TurnDispatcher, TurnOutcome};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::RelayResponder;

/// Widget state shared through Leptos context.
///
/// Anything on the page that wants to open the chat calls [`ChatState::open`]
/// instead of poking the widget's DOM.
#[derive(Clone)]
pub struct ChatState {
    // --- Read signals (for components to subscribe to) ---
    pub conversation: ReadSignal<ConversationStore>,
    pub is_open: ReadSignal<bool>,
    pub is_minimized: ReadSignal<bool>,

    // --- Write signals (for mutating state) ---
    pub set_conversation: WriteSignal<ConversationStore>,
    pub set_is_open: WriteSignal<bool>,
    pub set_is_minimized: WriteSignal<bool>,

    dispatcher: TurnDispatcher<RelayResponder>,
}

impl ChatState {
    /// Create a new `ChatState` and provide it in the current Leptos context.
    pub fn provide(initial_open: bool) -> Self {
        let (conversation, set_conversation) = signal(ConversationStore::new());
        let (is_open, set_is_open) = signal(initial_open);
        let (is_minimized, set_is_minimized) = signal(false);

        let state = Self {
            conversation,
            is_open,
            is_minimized,
            set_conversation,
            set_is_open,
            set_is_minimized,
            dispatcher: TurnDispatcher::new(RelayResponder::default()),
        };

        provide_context(state.clone());
        state
    }

    pub fn is_sending(&self) -> bool {
        self.conversation.with(|c| c.current_state().is_sending())
    }

    pub fn open(&self) {
        self.set_is_open.set(true);
        self.set_is_minimized.set(false);
    }

    pub fn close(&self) {
        self.set_is_open.set(false);
    }

    pub fn minimize(&self) {
        self.set_is_minimized.set(true);
    }

    pub fn restore(&self) {
        self.set_is_minimized.set(false);
    }

    pub fn clear(&self) {
        self.set_conversation.update(|c| c.clear());
    }

    /// Start a turn. Rejected input is ignored without touching the view.
    pub fn send_message(&self, text: String) {
        let pending = match self.set_conversation.try_update(|c| c.begin_turn(&text)) {
            Some(Ok(pending)) => pending,
            Some(Err(rejected)) => {
                log::debug!("Submission ignored: {rejected}");
                return;
            }
            None => return,
        };

        let dispatcher = self.dispatcher.clone();
        let set_conversation = self.set_conversation;

        spawn_local(async move {
            let reply = dispatcher.exchange(pending.request()).await;
            match set_conversation.try_update(|c| c.complete_turn(pending, reply)) {
                Some(TurnOutcome::Failed { error, .. }) => log::warn!("Chat turn failed: {error}"),
                Some(_) => {}
                // Widget torn down mid-flight; nothing left to update.
                None => log::debug!("Chat reply arrived after the widget was disposed"),
            }
        });
    }
}
