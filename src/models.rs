use serde::{Deserialize, Serialize};

/// Instruction used when an analysis request carries no prompt of its own.
pub const DEFAULT_ANALYSIS_PROMPT: &str = "画像の内容を詳しく分析してください。";

/// Prefix added to every soft error returned by `/analyze-image`.
pub const ANALYSIS_ERROR_PREFIX: &str = "画像解析エラー";

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub user_message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeImageRequest {
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub prompt: Option<String>,
}

impl AnalyzeImageRequest {
    /// The caller's instruction, or the default one when missing or blank.
    pub fn effective_prompt(&self) -> &str {
        match self.prompt.as_deref().map(str::trim) {
            Some(p) if !p.is_empty() => p,
            _ => DEFAULT_ANALYSIS_PROMPT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Success,
    Error,
}

/// Body of every `/analyze-image` answer. Failures travel as soft errors
/// in `error` with a 200 status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyzeImageResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub status: AnalysisStatus,
}

impl AnalyzeImageResponse {
    pub fn success(analysis: String) -> Self {
        Self { analysis: Some(analysis), error: None, status: AnalysisStatus::Success }
    }

    pub fn failure(detail: impl std::fmt::Display) -> Self {
        Self {
            analysis: None,
            error: Some(format!("{ANALYSIS_ERROR_PREFIX}: {detail}")),
            status: AnalysisStatus::Error,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// Error body for non-2xx answers.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
