mod api;
mod components;
mod state;

use leptos::mount::mount_to_body;
use leptos::prelude::*;

use components::chat_widget::ChatWidget;
use components::landing::Landing;
use state::ChatState;

/// Root application component.
#[component]
fn App() -> impl IntoView {
    ChatState::provide(false);

    view! {
        <Landing />
        <ChatWidget />
    }
}

fn main() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");
    mount_to_body(App);
}
