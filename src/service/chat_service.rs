use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::{info, warn};

use crate::agent::Assistant;
use crate::errors::AppError;
use crate::models::{AnalyzeImageRequest, AnalyzeImageResponse, ChatRequest, ChatResponse};

const MAX_MESSAGE_LENGTH: usize = 8000;

/// Removes a leading `data:<mime>;base64,` header, if any.
pub fn strip_data_uri_prefix(image: &str) -> &str {
    match image.strip_prefix("data:") {
        Some(rest) => rest.split_once(',').map_or(image, |(_, payload)| payload),
        None => image,
    }
}

#[derive(Clone)]
pub struct ChatService {
    agent: Arc<dyn Assistant>,
}

impl ChatService {
    pub fn new(agent: Arc<dyn Assistant>) -> Self {
        Self { agent }
    }

    pub async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, AppError> {
        // ── Validation ────────────────────────────────────────────────────────
        let message = request.user_message.trim();
        if message.is_empty() {
            return Err(AppError::empty_field("user_message"));
        }
        if message.len() > MAX_MESSAGE_LENGTH {
            return Err(AppError::FieldTooLong {
                field_name: "user_message".to_string(),
                max_length: MAX_MESSAGE_LENGTH,
                actual_length: message.len(),
            });
        }

        let reply = self.agent.chat(message).await?;
        Ok(ChatResponse { reply })
    }

    /// Never fails: problems are reported as a soft error in the body.
    pub async fn analyze_image(&self, request: AnalyzeImageRequest) -> AnalyzeImageResponse {
        match self.try_analyze_image(&request).await {
            Ok(analysis) => {
                info!(chars = analysis.chars().count(), "Image analysis completed");
                AnalyzeImageResponse::success(analysis)
            }
            Err(e) => {
                warn!("Image analysis failed: {e}");
                AnalyzeImageResponse::failure(e)
            }
        }
    }

    async fn try_analyze_image(&self, request: &AnalyzeImageRequest) -> Result<String, AppError> {
        let image = strip_data_uri_prefix(request.image.trim());
        if image.is_empty() {
            return Err(AppError::empty_field("image"));
        }
        STANDARD
            .decode(image)
            .map_err(|e| AppError::InvalidImage { reason: e.to_string() })?;

        self.agent
            .analyze_image(image, request.effective_prompt())
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::models::{AnalysisStatus, DEFAULT_ANALYSIS_PROMPT};

    #[derive(Default)]
    struct RecordingAssistant {
        prompts: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl Assistant for RecordingAssistant {
        async fn chat(&self, user_message: &str) -> Result<String, AppError> {
            if self.fail {
                return Err(AppError::OllamaUnavailable { host: "test".into() });
            }
            Ok(format!("echo: {user_message}"))
        }

        async fn analyze_image(&self, image_base64: &str, prompt: &str) -> Result<String, AppError> {
            self.prompts
                .lock()
                .unwrap()
                .push((image_base64.to_string(), prompt.to_string()));
            if self.fail {
                return Err(AppError::InferenceError { message: "vision down".into() });
            }
            Ok("a small cat".to_string())
        }
    }

    fn service(assistant: Arc<RecordingAssistant>) -> ChatService {
        ChatService::new(assistant)
    }

    #[test]
    fn data_uri_prefix_is_stripped() {
        assert_eq!(strip_data_uri_prefix("data:image/png;base64,QUJD"), "QUJD");
        assert_eq!(strip_data_uri_prefix("QUJD"), "QUJD");
        assert_eq!(strip_data_uri_prefix("data:broken"), "data:broken");
    }

    #[tokio::test]
    async fn chat_trims_and_forwards() {
        let svc = service(Arc::new(RecordingAssistant::default()));
        let resp = svc
            .chat(ChatRequest { user_message: "  Hello \n".into() })
            .await
            .unwrap();
        assert_eq!(resp.reply, "echo: Hello");
    }

    #[tokio::test]
    async fn blank_chat_message_is_rejected() {
        let svc = service(Arc::new(RecordingAssistant::default()));
        let err = svc
            .chat(ChatRequest { user_message: " \t ".into() })
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn oversized_chat_message_is_rejected() {
        let svc = service(Arc::new(RecordingAssistant::default()));
        let err = svc
            .chat(ChatRequest { user_message: "x".repeat(MAX_MESSAGE_LENGTH + 1) })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::FieldTooLong { actual_length, .. } if actual_length == 8001));
    }

    #[tokio::test]
    async fn agent_failure_propagates_from_chat() {
        let assistant = Arc::new(RecordingAssistant { fail: true, ..Default::default() });
        let err = service(assistant)
            .chat(ChatRequest { user_message: "hi".into() })
            .await
            .unwrap_err();
        assert!(err.is_agent_unavailable());
    }

    #[tokio::test]
    async fn analysis_uses_default_prompt_and_stripped_payload() {
        let assistant = Arc::new(RecordingAssistant::default());
        let resp = service(assistant.clone())
            .analyze_image(AnalyzeImageRequest {
                image: "data:image/png;base64,QUJD".into(),
                prompt: None,
            })
            .await;

        assert_eq!(resp, AnalyzeImageResponse::success("a small cat".into()));
        let prompts = assistant.prompts.lock().unwrap();
        assert_eq!(prompts.as_slice(), &[("QUJD".to_string(), DEFAULT_ANALYSIS_PROMPT.to_string())]);
    }

    #[tokio::test]
    async fn missing_image_is_a_soft_error() {
        let assistant = Arc::new(RecordingAssistant::default());
        let resp = service(assistant.clone())
            .analyze_image(AnalyzeImageRequest { image: String::new(), prompt: None })
            .await;
        assert_eq!(resp.status, AnalysisStatus::Error);
        assert!(resp.error.unwrap().starts_with("画像解析エラー: "));
        assert!(assistant.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn undecodable_image_never_reaches_the_model() {
        let assistant = Arc::new(RecordingAssistant::default());
        let resp = service(assistant.clone())
            .analyze_image(AnalyzeImageRequest { image: "not base64!".into(), prompt: None })
            .await;
        assert_eq!(resp.status, AnalysisStatus::Error);
        assert!(assistant.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn model_failure_becomes_soft_error() {
        let assistant = Arc::new(RecordingAssistant { fail: true, ..Default::default() });
        let resp = service(assistant)
            .analyze_image(AnalyzeImageRequest { image: "QUJD".into(), prompt: Some("what?".into()) })
            .await;
        assert_eq!(resp.analysis, None);
        assert_eq!(resp.error.as_deref(), Some("画像解析エラー: Inference error: vision down"));
    }
}
