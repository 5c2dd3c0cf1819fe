//! OpenAI API data models
//!
//! Defines OpenAI chat completion request and response structures

use serde::{Deserialize, Serialize};

/// Placeholder text returned when the upstream reply carries no usable content
pub const NO_RESPONSE_PLACEHOLDER: &str = "No response from API.";

/// OpenAI chat completion request structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIRequest {
    /// Model name
    pub model: String,
    /// Message list
    pub messages: Vec<OpenAIMessage>,
    /// Maximum tokens to generate (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// OpenAI message structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIMessage {
    /// Role (system/user/assistant)
    pub role: String,
    /// Message content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl OpenAIMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: Some(content.into()),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: Some(content.into()),
        }
    }
}

/// OpenAI chat completion response structure
///
/// Fields are lenient: a structurally valid reply with missing pieces is
/// handled by substituting placeholder text, not by failing the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenAIResponse {
    /// Response ID
    #[serde(default)]
    pub id: Option<String>,
    /// Model used
    #[serde(default)]
    pub model: Option<String>,
    /// Choice list
    #[serde(default)]
    pub choices: Vec<OpenAIChoice>,
    /// Usage statistics
    #[serde(default)]
    pub usage: Option<OpenAIUsage>,
}

impl OpenAIResponse {
    /// Extract the first choice's message content, if present and non-empty
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .filter(|content| !content.is_empty())
    }

    /// First choice's content, or the literal placeholder when absent
    pub fn reply_text(&self) -> String {
        self.first_content()
            .map(str::to_string)
            .unwrap_or_else(|| NO_RESPONSE_PLACEHOLDER.to_string())
    }
}

/// OpenAI choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIChoice {
    /// Choice index
    #[serde(default)]
    pub index: u32,
    /// Message content
    pub message: OpenAIMessage,
    /// Finish reason
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// OpenAI usage statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIUsage {
    /// Prompt token count
    pub prompt_tokens: u32,
    /// Completion token count
    pub completion_tokens: u32,
    /// Total token count
    pub total_tokens: u32,
}

/// OpenAI error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIErrorResponse {
    /// Error information
    pub error: OpenAIError,
}

/// OpenAI error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIError {
    /// Error message
    pub message: String,
    /// Error type
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    /// Error code (optional)
    #[serde(default)]
    pub code: Option<String>,
}
