mod api;
mod components;
mod config;
mod image;
mod models;
mod session;
mod state;
mod strings;
mod transcript;

use leptos::mount::mount_to_body;
use leptos::prelude::*;

use components::chat::ChatArea;
use config::ApiConfig;
use state::AppState;

/// Root application component.
#[component]
fn App(config: ApiConfig) -> impl IntoView {
    AppState::provide(config);

    view! {
        <div class="app-container">
            <ChatArea />
        </div>
    }
}

fn main() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");

    // Resolved once; every request of the session uses this base.
    let config = ApiConfig::resolve();
    log::info!("using backend at {}", config.base());

    mount_to_body(move || view! { <App config=config.clone() /> });
}
