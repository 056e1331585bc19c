use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::HttpBackend;
use crate::config::ApiConfig;
use crate::image::{self, PendingImage};
use crate::models::ChatMessage;
use crate::session::{self, ChatSurface};
use crate::transcript::Transcript;

/// Shared application state, provided via Leptos context.
#[derive(Clone, Copy)]
pub struct AppState {
    // --- Read signals (for components to subscribe to) ---
    pub transcript: ReadSignal<Transcript>,
    pub draft: ReadSignal<String>,
    pub image: ReadSignal<Option<PendingImage>>,
    pub busy: ReadSignal<bool>,
    pub drag_over: ReadSignal<bool>,

    // --- Write signals (for mutating state) ---
    pub set_transcript: WriteSignal<Transcript>,
    pub set_draft: WriteSignal<String>,
    pub set_image: WriteSignal<Option<PendingImage>>,
    pub set_busy: WriteSignal<bool>,
    pub set_drag_over: WriteSignal<bool>,

    backend: StoredValue<HttpBackend>,
}

impl AppState {
    /// Create a new `AppState` and provide it in the current Leptos context.
    pub fn provide(config: ApiConfig) -> Self {
        let (transcript, set_transcript) = signal(Transcript::new());
        let (draft, set_draft) = signal(String::new());
        let (image, set_image) = signal(None::<PendingImage>);
        let (busy, set_busy) = signal(false);
        let (drag_over, set_drag_over) = signal(false);

        let state = Self {
            transcript,
            draft,
            image,
            busy,
            drag_over,
            set_transcript,
            set_draft,
            set_image,
            set_busy,
            set_drag_over,
            backend: StoredValue::new(HttpBackend::new(config)),
        };

        provide_context(state);
        state
    }

    pub fn api_config(&self) -> ApiConfig {
        self.backend.with_value(|b| b.config().clone())
    }

    /// Whether the send control should be enabled. Tracked.
    pub fn can_send(&self) -> bool {
        !self.busy.get() && (self.image.with(Option::is_some) || !self.draft.with(|d| d.trim().is_empty()))
    }

    /// Send trigger: analyzes the pending image if there is one, else sends the draft.
    pub fn submit(&self) {
        let state = *self;
        spawn_local(async move {
            let backend = state.backend.get_value();
            let dispatched = session::submit(&state, &backend).await;
            log::debug!("send trigger handled: {dispatched:?}");
        });
    }

    /// Reads `file` into memory and makes it the pending image.
    pub fn select_file(&self, file: web_sys::File) {
        let set_image = self.set_image;
        spawn_local(async move {
            match image::read_file(&file).await {
                Ok(img) => {
                    log::debug!("selected {} ({}, {} bytes)", img.name(), img.mime(), img.size());
                    set_image.set(Some(img));
                }
                Err(e) => log::warn!("ignoring file: {e}"),
            }
        });
    }

    pub fn remove_image(&self) {
        self.set_image.set(None);
    }
}

impl ChatSurface for AppState {
    fn input(&self) -> String {
        self.draft.get_untracked()
    }

    fn clear_input(&self) {
        self.set_draft.set(String::new());
    }

    fn pending_image(&self) -> Option<PendingImage> {
        self.image.get_untracked()
    }

    fn clear_image(&self) {
        self.set_image.set(None);
    }

    fn is_busy(&self) -> bool {
        self.busy.get_untracked()
    }

    fn mark_busy(&self, busy: bool) {
        self.set_busy.set(busy);
    }

    fn append(&self, message: ChatMessage) {
        self.set_transcript.update(|t| t.push(message));
    }
}
