use axum::http::StatusCode;
use chrono::{DateTime, Datelike, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::parse::{parse_analysis, parse_prefill, AnalysisResult, ParseOutcome};
use super::payload::{AnalysisPayload, PrefillPayload, SuggestedInputs};
use super::prompt;
use crate::{
    config::AdvisorConfig,
    error::AppError,
    logging::{preview, SensitiveApiKey},
    metrics,
    models::openai::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage},
    providers,
};

const ANALYZE_TEMPERATURE: f32 = 0.4;
const ANALYZE_MAX_TOKENS: u32 = 1500;
const PREFILL_TEMPERATURE: f32 = 0.3;
const PREFILL_MAX_TOKENS: u32 = 800;

pub const NOTE_PARSED_FROM_REASONING: &str = "Parsed from reasoning";
pub const NOTE_NO_NUMERIC_VALUES: &str = "Could not parse numeric values";

/// Body of a successful analyze call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub analysis_result: AnalysisResult,
    pub model: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Body of a successful prefill call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefillResponse {
    pub suggested_inputs: SuggestedInputs,
    pub model: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Client for the advisory chat-completion calls
///
/// Holds only the pooled HTTP client; the advisor settings are passed per
/// call so that a config reload takes effect on the next request.
#[derive(Debug, Clone, Default)]
pub struct AdvisorClient {
    http: Client,
}

impl AdvisorClient {
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    /// Narrative verdict for a computed result
    pub async fn analyze(
        &self,
        config: &AdvisorConfig,
        payload: &AnalysisPayload,
    ) -> Result<AnalyzeResponse, AppError> {
        ensure_usable(config)?;

        let user_prompt =
            prompt::analysis_prompt(payload, current_year(), &config.response_language);
        let request = ChatCompletionRequest {
            model: config.model.clone(),
            messages: vec![
                ChatMessage::system(prompt::analysis_system_prompt()),
                ChatMessage::user(user_prompt),
            ],
            max_tokens: Some(ANALYZE_MAX_TOKENS),
            temperature: Some(ANALYZE_TEMPERATURE),
            stream: None,
        };

        let response = self.call("analyze", config, &request).await?;
        let message = response.first_message().cloned().unwrap_or_default();
        let outcome = parse_analysis(&message);
        metrics::record_advisory("analyze", outcome.label());

        let (analysis_result, note) = match outcome {
            ParseOutcome::Parsed(result) => (result, None),
            ParseOutcome::Partial { value, .. } => {
                tracing::warn!("Analyze reply was not JSON, falling back to reasoning text");
                (value, Some(NOTE_PARSED_FROM_REASONING.to_string()))
            }
            ParseOutcome::Unparsed { raw } => {
                tracing::error!(raw = %preview(&raw, 200), "Failed to parse analyze reply");
                return Err(unparsed_error(&raw));
            }
        };

        tracing::info!(
            model = %config.model,
            verdict = ?analysis_result.verdict,
            confidence = analysis_result.confidence,
            "Analysis completed"
        );

        Ok(AnalyzeResponse {
            analysis_result,
            model: config.model.clone(),
            timestamp: Utc::now(),
            note,
        })
    }

    /// Suggested input values for a vehicle
    pub async fn prefill(
        &self,
        config: &AdvisorConfig,
        payload: &PrefillPayload,
    ) -> Result<PrefillResponse, AppError> {
        ensure_usable(config)?;

        let user_prompt =
            prompt::prefill_prompt(payload, current_year(), &config.response_language);
        let request = ChatCompletionRequest {
            model: config.model.clone(),
            messages: vec![
                ChatMessage::system(prompt::prefill_system_prompt(&config.response_language)),
                ChatMessage::user(user_prompt),
            ],
            max_tokens: Some(PREFILL_MAX_TOKENS),
            temperature: Some(PREFILL_TEMPERATURE),
            stream: None,
        };

        let response = self.call("prefill", config, &request).await?;
        let message = response.first_message().cloned().unwrap_or_default();
        let outcome = parse_prefill(&message);
        metrics::record_advisory("prefill", outcome.label());

        let (suggested_inputs, source, note) = match outcome {
            ParseOutcome::Parsed(value) => (value, None, None),
            ParseOutcome::Partial { value, source } => {
                tracing::warn!(
                    source = source.as_str(),
                    "Prefill content empty, used reasoning text"
                );
                let note = (!value.has_values()).then(|| NOTE_NO_NUMERIC_VALUES.to_string());
                (value, Some(source.as_str().to_string()), note)
            }
            ParseOutcome::Unparsed { raw } => {
                tracing::error!(raw = %preview(&raw, 200), "Failed to parse prefill reply");
                return Err(unparsed_error(&raw));
            }
        };

        Ok(PrefillResponse {
            suggested_inputs,
            model: config.model.clone(),
            timestamp: Utc::now(),
            source,
            note,
        })
    }

    async fn call(
        &self,
        endpoint: &'static str,
        config: &AdvisorConfig,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, AppError> {
        tracing::debug!(
            endpoint,
            model = %config.model,
            api_key = %SensitiveApiKey::new(&config.api_key),
            "Calling advisory service"
        );

        let start = Instant::now();
        let result = providers::openai::chat_completions(&self.http, config, request).await;
        metrics::record_advisory_duration(endpoint, start.elapsed());

        match result {
            Ok(response) => {
                let message = response.first_message();
                tracing::debug!(
                    endpoint,
                    content_len = message.and_then(|m| m.content.as_ref()).map_or(0, String::len),
                    reasoning_len = message
                        .and_then(|m| m.reasoning_content.as_ref())
                        .map_or(0, String::len),
                    "Advisory reply received"
                );
                Ok(response)
            }
            Err(e) => {
                metrics::record_advisory(endpoint, "error");
                tracing::error!(endpoint, error = %e, "Advisory request failed");
                Err(e)
            }
        }
    }
}

fn ensure_usable(config: &AdvisorConfig) -> Result<(), AppError> {
    if !config.enabled {
        return Err(AppError::AdvisoryUnavailable(
            "advisor is disabled".to_string(),
        ));
    }
    if config.api_key.is_empty() {
        return Err(AppError::AdvisoryUnavailable(
            "advisor API key is not configured".to_string(),
        ));
    }
    Ok(())
}

fn unparsed_error(raw: &str) -> AppError {
    AppError::UpstreamError {
        status: StatusCode::BAD_GATEWAY,
        message: format!("Failed to parse advisory reply: {}", preview(raw, 500)),
    }
}

fn current_year() -> i32 {
    Utc::now().year()
}
