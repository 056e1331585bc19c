use leptos::ev;
use leptos::prelude::*;

use crate::components::image_drop::ImageDropZone;
use crate::models::{ChatMessage, Role};
use crate::state::AppState;
use crate::strings;

/// Main chat area with the transcript, image drop zone, and input.
#[component]
pub fn ChatArea() -> impl IntoView {
    let state = expect_context::<AppState>();
    let chat_url = state.api_config().chat_url();

    view! {
        <main class="chat-area">
            <header class="chat-header">
                <h1>{strings::APP_TITLE}</h1>
                <p class="description">{strings::APP_DESCRIPTION}</p>
            </header>

            <TranscriptPanel />
            <ImageDropZone />
            <ChatInput />

            <footer class="endpoint">
                {strings::ENDPOINT_LABEL} " " <code>{chat_url}</code>
            </footer>
        </main>
    }
}

/// Scrolling log of every message sent and received this session.
#[component]
fn TranscriptPanel() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <div class="messages-container">
            {move || {
                state.transcript.with(|t| t.is_empty()).then(|| {
                    view! { <div class="empty-state">{strings::EMPTY_TRANSCRIPT}</div> }
                })
            }}
            // Entries are never removed, so the position is a stable key.
            <For
                each=move || {
                    state.transcript.with(|t| {
                        t.as_slice().iter().cloned().enumerate().collect::<Vec<_>>()
                    })
                }
                key=|(index, _)| *index
                let:entry
            >
                <MessageBubble message=entry.1 />
            </For>
            {move || {
                state.busy.get().then(|| view! { <div class="sending">{strings::SENDING}</div> })
            }}
        </div>
    }
}

/// A single chat message bubble. Content is shown as plain text.
#[component]
fn MessageBubble(message: ChatMessage) -> impl IntoView {
    let role: Role = message.role;

    view! {
        <div class=role.css_class()>
            <div class="role-label">{role.label()}</div>
            <div class="content">{message.content}</div>
        </div>
    }
}

/// Text input with the send button. Enter sends, Shift+Enter does not.
#[component]
fn ChatInput() -> impl IntoView {
    let state = expect_context::<AppState>();

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            state.submit();
        }
    };

    let placeholder = move || {
        if state.image.with(Option::is_some) {
            strings::IMAGE_PLACEHOLDER
        } else {
            strings::TEXT_PLACEHOLDER
        }
    };

    view! {
        <div class="input-area">
            <div class="input-row">
                <input
                    type="text"
                    placeholder=placeholder
                    prop:value=state.draft
                    on:input=move |ev| {
                        state.set_draft.set(event_target_value(&ev));
                    }
                    on:keydown=on_keydown
                />
                <button
                    class="send-btn"
                    on:click=move |_| state.submit()
                    disabled=move || !state.can_send()
                >
                    {move || {
                        if state.busy.get() {
                            strings::SENDING
                        } else if state.image.with(Option::is_some) {
                            strings::ANALYZE_BUTTON
                        } else {
                            strings::SEND_BUTTON
                        }
                    }}
                </button>
            </div>
        </div>
    }
}
