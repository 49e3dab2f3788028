use chat_core::Message;
use chrono::Local;
use leptos::ev;
use leptos::html::Div;
use leptos::prelude::*;

use crate::state::ChatState;

/// Floating chat widget: a launcher button while closed, the panel while open.
#[component]
pub fn ChatWidget() -> impl IntoView {
    let state = expect_context::<ChatState>();
    let is_open = state.is_open;

    move || {
        if is_open.get() {
            view! { <ChatPanel /> }.into_any()
        } else {
            view! { <Launcher /> }.into_any()
        }
    }
}

#[component]
fn Launcher() -> impl IntoView {
    let state = expect_context::<ChatState>();

    view! {
        <button class="chat-launcher" aria-label="Open chat" on:click=move |_| state.open()>
            "💬"
        </button>
    }
}

#[component]
fn ChatPanel() -> impl IntoView {
    let state = expect_context::<ChatState>();
    let minimized = state.is_minimized;

    view! {
        <div class="chat-widget" class:minimized=move || minimized.get()>
            <ChatHeader />
            <Show when=move || !minimized.get()>
                <MessageList />
                <ChatInput />
            </Show>
        </div>
    }
}

/// Title bar with clear, minimize/maximize and close controls.
#[component]
fn ChatHeader() -> impl IntoView {
    let state = expect_context::<ChatState>();
    let minimized = state.is_minimized;
    let st_clear = state.clone();
    let st_min = state.clone();
    let st_restore = state.clone();

    view! {
        <div class="chat-header">
            <div class="chat-title">
                <span class="status-dot"></span>
                <h3>"AI Assistant"</h3>
            </div>
            <div class="chat-controls">
                <Show
                    when=move || minimized.get()
                    fallback=move || {
                        let st_clear = st_clear.clone();
                        let st_min = st_min.clone();
                        view! {
                            <button class="icon-btn" aria-label="Clear chat" on:click=move |_| st_clear.clear()>
                                "⟳"
                            </button>
                            <button class="icon-btn" aria-label="Minimize" on:click=move |_| st_min.minimize()>
                                "–"
                            </button>
                        }
                    }
                >
                    {
                        let st_restore = st_restore.clone();
                        view! {
                            <button class="icon-btn" aria-label="Maximize" on:click=move |_| st_restore.restore()>
                                "□"
                            </button>
                        }
                    }
                </Show>
                <button class="icon-btn" aria-label="Close" on:click=move |_| state.close()>
                    "×"
                </button>
            </div>
        </div>
    }
}

/// Scrolling message history with the typing indicator underneath.
#[component]
fn MessageList() -> impl IntoView {
    let state = expect_context::<ChatState>();
    let conversation = state.conversation;
    let container = NodeRef::<Div>::new();

    // Keep the newest message in view
    Effect::new(move |_| {
        conversation.track();
        if let Some(el) = container.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });

    view! {
        <div class="messages-container" node_ref=container>
            {move || {
                if conversation.with(|c| c.is_empty()) {
                    view! {
                        <div class="empty-state">
                            "Ask me anything! I'm here to help."
                        </div>
                    }.into_any()
                } else {
                    view! {
                        <For
                            each=move || conversation.with(|c| c.messages().to_vec())
                            key=|m| m.id
                            let:msg
                        >
                            <MessageBubble message=msg />
                        </For>
                    }.into_any()
                }
            }}
            <Show when=move || conversation.with(|c| c.current_state().is_sending())>
                <TypingIndicator />
            </Show>
        </div>
    }
}

/// A single chat message bubble.
#[component]
fn MessageBubble(message: Message) -> impl IntoView {
    let css_class = if message.is_user() {
        "message user"
    } else {
        "message assistant"
    };
    let time = message
        .timestamp
        .with_timezone(&Local)
        .format("%H:%M")
        .to_string();

    view! {
        <div class=css_class>
            <div class="message-content">{message.content}</div>
            <div class="message-time">{time}</div>
        </div>
    }
}

#[component]
fn TypingIndicator() -> impl IntoView {
    view! {
        <div class="message assistant typing-indicator">
            <span class="dot"></span>
            <span class="dot"></span>
            <span class="dot"></span>
        </div>
    }
}

/// Chat input form with textarea and send button.
#[component]
fn ChatInput() -> impl IntoView {
    let state = expect_context::<ChatState>();
    let (input, set_input) = signal(String::new());

    let conversation = state.conversation;
    let is_sending = move || conversation.with(|c| c.current_state().is_sending());

    let send = move || {
        let text = input.get_untracked();
        if text.trim().is_empty() || is_sending() {
            return;
        }
        set_input.set(String::new());
        state.send_message(text);
    };

    let send_clone = send.clone();
    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            send_clone();
        }
    };

    let on_submit = move |_| {
        send();
    };

    view! {
        <div class="input-area">
            <div class="input-row">
                <textarea
                    rows="1"
                    placeholder="Type your message..."
                    prop:value=input
                    on:input=move |ev| {
                        set_input.set(event_target_value(&ev));
                    }
                    on:keydown=on_keydown
                    disabled=is_sending
                />
                <button
                    class="send-btn"
                    aria-label="Send message"
                    on:click=on_submit
                    disabled=move || is_sending() || input.get().trim().is_empty()
                >
                    "Send"
                </button>
            </div>
        </div>
    }
}
