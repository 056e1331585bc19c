use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use crate::errors::AppError;
use crate::models::{
    AnalyzeImageRequest, AnalyzeImageResponse, ChatRequest, ErrorResponse, HealthResponse,
};
use crate::service::chat_service::ChatService;

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET `/health` — liveness probe
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

/// POST `/chat` — `{ user_message }` in, `{ reply }` out
pub async fn chat_handler(
    State(svc): State<ChatService>,
    Json(request): Json<ChatRequest>,
) -> Response {
    match svc.chat(request).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(&err),
    }
}

/// POST `/analyze-image` — `{ image, prompt }` in, `{ analysis | error, status }` out.
/// Always 200; failures are soft errors in the body.
pub async fn analyze_image_handler(
    State(svc): State<ChatService>,
    Json(request): Json<AnalyzeImageRequest>,
) -> Json<AnalyzeImageResponse> {
    Json(svc.analyze_image(request).await)
}

// ── Helper ────────────────────────────────────────────────────────────────────

fn status_for(err: &AppError) -> StatusCode {
    if err.is_validation() {
        StatusCode::BAD_REQUEST
    } else if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else if err.is_agent_unavailable() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn error_response(err: &AppError) -> Response {
    let status = status_for(err);
    if status.is_server_error() {
        error!("Chat request failed: {err}");
    }
    (status, Json(ErrorResponse { error: err.to_string() })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_status_codes() {
        assert_eq!(status_for(&AppError::empty_field("user_message")), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(&AppError::ModelNotFound { model_name: "m".into() }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&AppError::OllamaUnavailable { host: "h".into() }),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_for(&AppError::InferenceError { message: "x".into() }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
