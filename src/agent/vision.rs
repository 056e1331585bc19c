use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::classify_failure;
use crate::errors::AppError;

#[derive(Serialize)]
struct VisionRequest<'a> {
    model: &'a str,
    stream: bool,
    messages: [VisionMessage<'a>; 1],
}

#[derive(Serialize)]
struct VisionMessage<'a> {
    role: &'static str,
    content: &'a str,
    images: [&'a str; 1],
}

#[derive(Deserialize)]
struct VisionResponse {
    message: VisionReply,
}

#[derive(Deserialize)]
struct VisionReply {
    content: String,
}

#[derive(Deserialize)]
struct OllamaErrorBody {
    error: String,
}

/// Minimal client for Ollama's `/api/chat` with an attached image.
#[derive(Clone)]
pub struct VisionClient {
    client: Client,
    base_url: String,
    model: String,
}

impl VisionClient {
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    pub async fn describe(&self, image_base64: &str, instruction: &str) -> Result<String, AppError> {
        let url = format!("{}/api/chat", self.base_url);
        let request = VisionRequest {
            model: &self.model,
            stream: false,
            messages: [VisionMessage {
                role: "user",
                content: instruction,
                images: [image_base64],
            }],
        };

        debug!(model = %self.model, bytes = image_base64.len(), "Sending image to Ollama");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Ollama vision request failed: {e}");
                if e.is_connect() {
                    AppError::OllamaUnavailable { host: self.base_url.clone() }
                } else {
                    AppError::InferenceError { message: e.to_string() }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<OllamaErrorBody>()
                .await
                .map(|b| b.error)
                .unwrap_or_else(|_| format!("Ollama returned status {status}"));
            error!("Ollama vision request rejected ({status}): {detail}");
            if status == StatusCode::NOT_FOUND {
                return Err(AppError::ModelNotFound { model_name: self.model.clone() });
            }
            return Err(classify_failure(detail, &self.base_url, &self.model));
        }

        let body: VisionResponse = response
            .json()
            .await
            .map_err(|e| AppError::InferenceError { message: format!("Malformed Ollama reply: {e}") })?;
        Ok(body.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_image_alongside_instruction() {
        let request = VisionRequest {
            model: "llava",
            stream: false,
            messages: [VisionMessage { role: "user", content: "describe", images: ["QUJD"] }],
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "model": "llava",
                "stream": false,
                "messages": [{ "role": "user", "content": "describe", "images": ["QUJD"] }]
            })
        );
    }

    #[test]
    fn reply_content_is_extracted() {
        let raw = r#"{"model":"llava","message":{"role":"assistant","content":"A cat."},"done":true}"#;
        let body: VisionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(body.message.content, "A cat.");
    }

    #[tokio::test]
    async fn unreachable_server_is_reported_unavailable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = VisionClient::new(&format!("http://127.0.0.1:{port}/"), "llava");
        let err = client.describe("QUJD", "describe").await.unwrap_err();
        assert!(err.is_agent_unavailable(), "unexpected error: {err}");
    }
}
