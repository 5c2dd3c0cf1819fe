//! HTTP client service
//!
//! Encapsulates HTTP communication with the OpenAI chat completions API

use crate::config::Settings;
use crate::models::openai::*;
use crate::utils::error::{AppError, AppResult};
use anyhow::{Context, Result};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, error};

/// System prompt used in deep search mode
pub const DEEP_SEARCH_SYSTEM_PROMPT: &str =
    "You are in deep search mode. Provide detailed responses.";

/// Default system prompt
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are ChatGPT.";

/// OpenAI API client
#[derive(Debug, Clone)]
pub struct OpenAIClient {
    client: Client,
    settings: Settings,
}

impl OpenAIClient {
    /// Create a new client instance
    pub fn new(settings: Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.openai.timeout))
            .user_agent(concat!("querygate/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, settings })
    }

    /// Forward a gated query as a single chat completion call and return the reply text
    ///
    /// Fails fast with a configuration error when no credential is present;
    /// no network I/O happens in that case.
    pub async fn complete_query(
        &self,
        query: &str,
        deep_search: bool,
        model: &str,
    ) -> AppResult<String> {
        let system_prompt = if deep_search {
            DEEP_SEARCH_SYSTEM_PROMPT
        } else {
            DEFAULT_SYSTEM_PROMPT
        };

        let request = OpenAIRequest {
            model: model.to_string(),
            messages: vec![
                OpenAIMessage::system(system_prompt),
                OpenAIMessage::user(query),
            ],
            max_tokens: Some(self.settings.pricing.max_response_tokens),
        };

        let response = self.chat_completions(request).await?;
        Ok(response.reply_text())
    }

    /// Send chat completion request
    async fn chat_completions(&self, request: OpenAIRequest) -> AppResult<OpenAIResponse> {
        debug!("Sending OpenAI chat completion request for model: {}", request.model);

        let api_key = self
            .settings
            .openai
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Config("OpenAI API key not configured".to_string()))?;

        let url = format!("{}/chat/completions", self.settings.openai.base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle HTTP response
    async fn handle_response(&self, response: Response) -> AppResult<OpenAIResponse> {
        let status = response.status();

        if status.is_success() {
            let openai_response: OpenAIResponse = response.json().await?;

            debug!("OpenAI request completed successfully");
            Ok(openai_response)
        } else {
            let error_text = response.text().await.unwrap_or_default();

            // Try to parse as OpenAI error format
            if let Ok(error_response) = serde_json::from_str::<OpenAIErrorResponse>(&error_text) {
                error!("OpenAI API error: {:?}", error_response.error);
                Err(AppError::ExternalApi(error_response.error.message))
            } else {
                error!("OpenAI API request failed: {} - {}", status, error_text);
                Err(AppError::ExternalApi(format!("{} - {}", status, error_text)))
            }
        }
    }
}
