//! Completion-service client.
//!
//! Single-shot completion requests, no retries. Every transport, status,
//! or payload failure surfaces as an `Err` the engines absorb before
//! falling back to their deterministic paths.

use aircall_common::LlmConfig;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    pub output: CompletionOutput,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionOutput {
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionChoice {
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct CompletionClient {
    http_client: reqwest::Client,
    config: LlmConfig,
}

impl CompletionClient {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            http_client: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            config,
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Issue one completion request and return the trimmed response text.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let request = CompletionRequest {
            model: self.config.model.clone(),
            prompt: prompt.to_string(),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            top_p: self.config.top_p,
        };

        debug!(
            "[>]  completion call [{}] ({} chars)",
            self.config.model,
            prompt.len()
        );

        let mut builder = self.http_client.post(&self.config.api_url).json(&request);
        if !self.config.api_key.is_empty() {
            builder = builder.bearer_auth(&self.config.api_key);
        }

        let response = builder
            .send()
            .await
            .context("Failed to send completion request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            bail!("Completion service returned {}: {}", status, error_text);
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .context("Failed to parse completion response")?;

        let text = completion
            .output
            .choices
            .first()
            .map(|c| c.text.trim().to_string())
            .unwrap_or_default();

        if text.is_empty() {
            bail!("Completion service returned an empty choice");
        }

        debug!("[<]  completion response ({} chars)", text.len());
        Ok(text)
    }
}

/// Slice the JSON object out of text that may have prose around it.
pub fn extract_json(text: &str) -> &str {
    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            return &text[start..=end];
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_strips_prose() {
        let text = "Sure, here you go:\n{\"category\": \"Complaint\"}\nHope that helps!";
        assert_eq!(extract_json(text), "{\"category\": \"Complaint\"}");
    }

    #[test]
    fn test_extract_json_passthrough_without_braces() {
        assert_eq!(extract_json("NONE"), "NONE");
    }

    #[test]
    fn test_extract_json_nested_objects() {
        let text = "prefix {\"a\": {\"b\": 1}} suffix";
        assert_eq!(extract_json(text), "{\"a\": {\"b\": 1}}");
    }

    #[test]
    fn test_completion_response_wire_shape() {
        let json = r#"{"output": {"choices": [{"text": " AI123 "}]}}"#;
        let parsed: CompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.output.choices[0].text, " AI123 ");
    }
}
