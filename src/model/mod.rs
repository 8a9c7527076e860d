pub mod prediction;

use std::time::Duration;

use log::{debug, error, info};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::web::models::ChatMessage;

pub const TEMPERATURE: f32 = 0.5;
pub const MAX_COMPLETION_TOKENS: u32 = 1024;
pub const TOP_P: f32 = 1.0;

#[derive(Debug, Serialize)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub model: String,
    pub temperature: f32,
    pub max_completion_tokens: u32,
    pub top_p: f32,
    pub stream: bool,
}

/// Client for an OpenAI-compatible chat-completion endpoint.
pub struct CompletionClient {
    url: String,
    api_key: String,
    model: String,
    client: Client,
}

impl CompletionClient {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        info!("Using completion endpoint at: {}", config.completion_url);
        Ok(Self {
            url: config.completion_url.clone(),
            api_key: config.api_key.clone(),
            model: config.completion_model.clone(),
            client: http_client(config.upstream_timeout)?,
        })
    }

    pub fn request_for(&self, messages: Vec<ChatMessage>) -> CompletionRequest {
        CompletionRequest {
            messages,
            model: self.model.clone(),
            temperature: TEMPERATURE,
            max_completion_tokens: MAX_COMPLETION_TOKENS,
            top_p: TOP_P,
            stream: false,
        }
    }

    /// Sends `messages` upstream and returns the first choice's text.
    pub async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let payload = self.request_for(messages);
        info!(
            "Sending {} messages to completion endpoint (model: {})",
            payload.messages.len(),
            payload.model
        );
        debug!("Payload: {:?}", payload);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::from_transport("completion endpoint", e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Completion endpoint error {}: {}", status, error_text);
            return Err(AppError::upstream_status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::from_transport("completion endpoint", e))?;
        let response_json: Value = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::upstream_shape(format!("response is not JSON: {}", e)))?;
        debug!("Response JSON: {}", response_json);

        let content = first_choice_content(&response_json)
            .ok_or_else(|| AppError::upstream_shape("response has no choices[0].message.content"))?;

        info!("Response length: {} characters", content.len());
        Ok(content.to_string())
    }
}

fn first_choice_content(response: &Value) -> Option<&str> {
    response
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
}

pub(crate) fn http_client(timeout: Duration) -> anyhow::Result<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_first_choice_content() {
        let body = json!({
            "choices": [
                { "message": { "role": "assistant", "content": "Spray neem oil." } },
                { "message": { "role": "assistant", "content": "ignored" } }
            ]
        });
        assert_eq!(first_choice_content(&body), Some("Spray neem oil."));
    }

    #[test]
    fn shape_mismatches_yield_none() {
        assert_eq!(first_choice_content(&json!({})), None);
        assert_eq!(first_choice_content(&json!({ "choices": [] })), None);
        assert_eq!(
            first_choice_content(&json!({ "choices": [{ "message": { "content": null } }] })),
            None
        );
    }
}
