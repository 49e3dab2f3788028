use leptos::prelude::*;

use crate::state::ChatState;

const FEATURES: &[(&str, &str)] = &[
    ("Instant answers", "Ask about our services and get a reply in seconds."),
    ("Always on", "The assistant is available around the clock."),
    ("Human handoff", "Complex questions are routed to our team."),
];

/// Marketing page. Every call-to-action opens the chat widget.
#[component]
pub fn Landing() -> impl IntoView {
    let state = expect_context::<ChatState>();
    let st_hero = state.clone();

    view! {
        <main class="landing">
            <section class="hero">
                <h1>"Welcome to our AI Assistant"</h1>
                <p>"Get help with products, services and support, right from this page."</p>
                <button class="cta" on:click=move |_| st_hero.open()>
                    "Chat with us"
                </button>
            </section>

            <section class="features">
                <h2>"What it can do"</h2>
                <div class="feature-grid">
                    {FEATURES
                        .iter()
                        .map(|(title, blurb)| {
                            let state = state.clone();
                            view! {
                                <div class="feature-card">
                                    <h3>{*title}</h3>
                                    <p>{*blurb}</p>
                                    <button class="link-btn" on:click=move |_| state.open()>
                                        "Try it"
                                    </button>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </section>
        </main>
    }
}
