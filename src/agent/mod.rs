mod vision;

use async_trait::async_trait;
use rig::client::Nothing;
use rig::completion::Chat;
use rig::message::Message as RigMessage;
use rig::prelude::CompletionClient;
use rig::providers::ollama;
use tracing::error;

use crate::config::AppConfig;
use crate::errors::AppError;

pub use vision::VisionClient;

const PREAMBLE: &str = "あなたは親切で実用的なAIメンターです。\n\
                        ・箇条書きで簡潔に。\n\
                        ・必要なら短いコード例も。\n\
                        ・嘘はつかない。わからない時は正直に言う。";

/// Wraps the caller's instruction in the fixed five-part analysis layout.
pub fn analysis_instruction(user_prompt: &str) -> String {
    format!(
        "以下の画像を分析し、構造化された形で情報を提供してください。\n\n\
         {user_prompt}\n\n\
         以下の形式で回答してください：\n\
         1. 画像の概要\n\
         2. 主要な要素・オブジェクト\n\
         3. 色彩・構成\n\
         4. 注目すべき詳細\n\
         5. 推測される文脈・用途"
    )
}

/// Maps a failure description from the model server onto an [`AppError`].
pub(crate) fn classify_failure(message: String, host: &str, model: &str) -> AppError {
    if message.contains("Connection refused") || message.contains("connect") {
        AppError::OllamaUnavailable { host: host.to_string() }
    } else if message.contains("model") && message.contains("not found") {
        AppError::ModelNotFound { model_name: model.to_string() }
    } else {
        AppError::InferenceError { message }
    }
}

/// The language-model operations the HTTP layer needs.
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Answers a single user message; no history is replayed.
    async fn chat(&self, user_message: &str) -> Result<String, AppError>;

    /// Describes a base64-encoded image (no data-URI prefix) following `prompt`.
    async fn analyze_image(&self, image_base64: &str, prompt: &str) -> Result<String, AppError>;
}

/// [`Assistant`] backed by a local Ollama server: text turns go through a rig
/// agent, image turns through Ollama's native chat endpoint.
#[derive(Clone)]
pub struct OllamaAgentService {
    client: ollama::Client,
    vision: VisionClient,
    base_url: String,
    model: String,
}

impl OllamaAgentService {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let client = ollama::Client::builder()
            .api_key(Nothing)
            .base_url(&config.ollama_base_url)
            .build()
            .map_err(|e| AppError::Unexpected(format!("Failed to build Ollama client: {e}")))?;
        Ok(Self {
            client,
            vision: VisionClient::new(&config.ollama_base_url, &config.vision_model),
            base_url: config.ollama_base_url.clone(),
            model: config.chat_model.clone(),
        })
    }
}

#[async_trait]
impl Assistant for OllamaAgentService {
    async fn chat(&self, user_message: &str) -> Result<String, AppError> {
        let agent = self
            .client
            .agent(&self.model)
            .preamble(PREAMBLE)
            .build();

        agent
            .chat(user_message, Vec::<RigMessage>::new())
            .await
            .map_err(|e| {
                error!("Ollama inference failed: {e}");
                classify_failure(e.to_string(), &self.base_url, &self.model)
            })
    }

    async fn analyze_image(&self, image_base64: &str, prompt: &str) -> Result<String, AppError> {
        self.vision
            .describe(image_base64, &analysis_instruction(prompt))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instruction_embeds_user_prompt_before_layout() {
        let text = analysis_instruction("猫は何匹？");
        let prompt_at = text.find("猫は何匹？").unwrap();
        let layout_at = text.find("1. 画像の概要").unwrap();
        assert!(prompt_at < layout_at);
        assert!(text.ends_with("5. 推測される文脈・用途"));
    }

    #[test]
    fn connection_failures_are_unavailable() {
        let err = classify_failure(
            "error sending request: Connection refused (os error 111)".into(),
            "http://localhost:11434",
            "llama3.2",
        );
        assert!(err.is_agent_unavailable());
    }

    #[test]
    fn missing_model_is_not_found() {
        let err = classify_failure(
            "model \"llava\" not found, try pulling it first".into(),
            "http://localhost:11434",
            "llava",
        );
        assert!(matches!(err, AppError::ModelNotFound { ref model_name } if model_name == "llava"));
    }

    #[test]
    fn anything_else_is_inference_error() {
        let err = classify_failure("context length exceeded".into(), "h", "m");
        assert!(matches!(err, AppError::InferenceError { .. }));
    }
}
