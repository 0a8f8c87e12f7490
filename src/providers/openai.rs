use crate::{
    config::AdvisorConfig,
    error::AppError,
    models::openai::{ChatCompletionRequest, ChatCompletionResponse},
};
use reqwest::Client;
use std::time::Duration;

/// Call an OpenAI-compatible Chat Completions API
pub async fn chat_completions(
    client: &Client,
    config: &AdvisorConfig,
    request: &ChatCompletionRequest,
) -> Result<ChatCompletionResponse, AppError> {
    let url = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));

    let response = client
        .post(&url)
        .header("Authorization", format!("Bearer {}", config.api_key))
        .header("Content-Type", "application/json")
        .timeout(Duration::from_secs(config.timeout_seconds))
        .json(request)
        .send()
        .await?;

    // Check for HTTP errors
    if !response.status().is_success() {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(AppError::UpstreamError {
            status,
            message: error_text,
        });
    }

    Ok(response.json().await?)
}
