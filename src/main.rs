use std::sync::Arc;

use tracing::info;

use mini_chat::agent::OllamaAgentService;
use mini_chat::config::AppConfig;
use mini_chat::routes::router;
use mini_chat::service::chat_service::ChatService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Initialise tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mini_chat=debug,tower_http=debug".into()),
        )
        .init();

    let config = AppConfig::from_env()?;
    info!(
        ollama = %config.ollama_base_url,
        chat_model = %config.chat_model,
        vision_model = %config.vision_model,
        "Configuration loaded"
    );

    // ── Dependency wiring ─────────────────────────────────────────────────────
    let agent = OllamaAgentService::new(&config)?;
    let chat_service = ChatService::new(Arc::new(agent));

    let app = router(chat_service, &config);

    // ── Listen ────────────────────────────────────────────────────────────────
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{addr}/");

    axum::serve(listener, app).await?;
    Ok(())
}
