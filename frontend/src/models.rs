use serde::{Deserialize, Serialize};

use crate::strings;

/// Who authored a transcript entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// CSS class used for the message bubble.
    pub fn css_class(self) -> &'static str {
        match self {
            Role::User => "message user",
            Role::Assistant => "message assistant",
        }
    }

    /// Label shown above the message bubble.
    pub fn label(self) -> &'static str {
        match self {
            Role::User => strings::USER_LABEL,
            Role::Assistant => strings::ASSISTANT_LABEL,
        }
    }
}

/// One transcript entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// Request body for `POST /chat`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub user_message: String,
}

/// Response body of `POST /chat`.
#[derive(Clone, Debug, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Request body for `POST /analyze-image`. `image` is bare base64.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct AnalyzeImageRequest {
    pub image: String,
    pub prompt: String,
}

/// Response body of `POST /analyze-image`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AnalyzeImageResponse {
    #[serde(default)]
    pub analysis: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AnalyzeImageResponse {
    /// Text to show: the analysis, else the soft error, else a fixed notice.
    pub fn into_display_text(self) -> String {
        self.analysis
            .or(self.error)
            .unwrap_or_else(|| strings::EMPTY_ANALYSIS.to_string())
    }
}
