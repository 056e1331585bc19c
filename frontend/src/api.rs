use gloo_net::http::Request;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::ApiConfig;
use crate::models::{AnalyzeImageRequest, AnalyzeImageResponse, ChatRequest, ChatResponse};

/// Transport-level failure of a backend call. Soft errors reported inside a
/// successful analysis body are not represented here.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("HTTP {0}")]
    Http(u16),
    #[error("{0}")]
    Network(String),
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("could not encode request: {0}")]
    Encode(String),
}

/// The two backend operations the chat UI depends on.
#[allow(async_fn_in_trait)]
pub trait ChatBackend {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError>;

    async fn analyze_image(
        &self,
        request: &AnalyzeImageRequest,
    ) -> Result<AnalyzeImageResponse, ApiError>;
}

/// [`ChatBackend`] that talks to the real service over `fetch`.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    config: ApiConfig,
}

impl HttpBackend {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

impl ChatBackend for HttpBackend {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        post_json(&self.config.chat_url(), request).await
    }

    async fn analyze_image(
        &self,
        request: &AnalyzeImageRequest,
    ) -> Result<AnalyzeImageResponse, ApiError> {
        post_json(&self.config.analyze_image_url(), request).await
    }
}

/// POSTs `body` as JSON. Non-2xx answers fail without reading the body.
async fn post_json<B, R>(url: &str, body: &B) -> Result<R, ApiError>
where
    B: Serialize,
    R: DeserializeOwned,
{
    let resp = Request::post(url)
        .json(body)
        .map_err(|e| ApiError::Encode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !resp.ok() {
        return Err(ApiError::Http(resp.status()));
    }

    resp.json::<R>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}
