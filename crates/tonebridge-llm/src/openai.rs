//! OpenAI Provider - Chat Completions API
//!
//! Uses `gpt-4o-mini` unless another model is configured.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use tonebridge::{
    ChatMessage, CompletionOptions, CompletionResponse, DomainError, LlmProvider, MessageRole,
    TokenUsage,
};

use crate::http::{build_client, map_http_error, request_failed};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const PROVIDER: &str = "OpenAI";

/// Configuration for the OpenAI provider
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    /// API root; any OpenAI-compatible endpoint works
    pub base_url: String,
    pub model: String,
    pub timeout: Option<Duration>,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// `LlmProvider` over OpenAI chat completions
#[derive(Clone)]
pub struct OpenAiProvider {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiConfig) -> Result<Self, DomainError> {
        if config.api_key.trim().is_empty() {
            return Err(DomainError::Configuration(
                "OpenAI API key is empty".to_string(),
            ));
        }

        let client = build_client(config.timeout)?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError> {
        let request = ChatCompletionRequest::new(&self.config.model, messages, options);

        debug!(
            model = %self.config.model,
            messages = messages.len(),
            temperature = ?options.temperature,
            "Sending OpenAI chat completion"
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| request_failed(PROVIDER, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(PROVIDER, status, body));
        }

        let payload: ChatCompletionResponse = response.json().await.map_err(|e| {
            DomainError::ExternalService(format!("Malformed OpenAI response: {}", e.without_url()))
        })?;

        payload.into_completion()
    }

    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model_id(&self) -> &str {
        &self.config.model
    }
}

// ============================================
// Request/Response Types
// ============================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: MessageRole,
    content: &'a str,
}

impl<'a> ChatCompletionRequest<'a> {
    fn new(model: &'a str, messages: &'a [ChatMessage], options: &CompletionOptions) -> Self {
        Self {
            model,
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role,
                    content: &m.content,
                })
                .collect(),
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    model: String,
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Compatible servers may omit individual counts
#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

impl ChatCompletionResponse {
    /// Take the first choice's text; a reply without text is a failed call
    fn into_completion(self) -> Result<CompletionResponse, DomainError> {
        let choice = self.choices.into_iter().next().ok_or_else(|| {
            DomainError::ExternalService("OpenAI returned no choices".to_string())
        })?;

        let content = choice.message.content.ok_or_else(|| {
            DomainError::ExternalService("OpenAI returned an empty message".to_string())
        })?;

        let usage = self
            .usage
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            content,
            model: self.model,
            usage,
            finish_reason: choice.finish_reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_shape() {
        let messages = vec![ChatMessage::system("sys"), ChatMessage::user("hello")];
        let options = CompletionOptions::default().with_temperature(0.7);
        let request = ChatCompletionRequest::new("gpt-4o-mini", &messages, &options);

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "model": "gpt-4o-mini",
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "hello"}
                ],
                "temperature": 0.7f32
            })
        );
    }

    #[test]
    fn test_response_takes_first_choice() {
        let payload: ChatCompletionResponse = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "model": "gpt-4o-mini-2024-07-18",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "{\"content\":\"a\"}"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 120, "completion_tokens": 30, "total_tokens": 150}
        }))
        .unwrap();

        let completion = payload.into_completion().unwrap();
        assert_eq!(completion.content, "{\"content\":\"a\"}");
        assert_eq!(completion.model, "gpt-4o-mini-2024-07-18");
        assert_eq!(completion.usage.total_tokens, 150);
        assert_eq!(completion.finish_reason.as_deref(), Some("stop"));
    }

    #[test]
    fn test_response_with_partial_usage() {
        let payload: ChatCompletionResponse = serde_json::from_value(json!({
            "model": "local",
            "choices": [{"message": {"content": "{}"}}],
            "usage": {"prompt_tokens": 3, "total_tokens": 5}
        }))
        .unwrap();

        let completion = payload.into_completion().unwrap();
        assert_eq!(completion.content, "{}");
        assert_eq!(completion.usage.prompt_tokens, 3);
        assert_eq!(completion.usage.completion_tokens, 0);
        assert_eq!(completion.usage.total_tokens, 5);
        assert_eq!(completion.finish_reason, None);
    }

    #[test]
    fn test_response_without_choices_is_transport_error() {
        let payload: ChatCompletionResponse =
            serde_json::from_value(json!({"model": "gpt-4o-mini", "choices": []})).unwrap();

        let err = payload.into_completion().unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn test_response_with_null_content_is_transport_error() {
        let payload: ChatCompletionResponse = serde_json::from_value(json!({
            "model": "gpt-4o-mini",
            "choices": [{"message": {"role": "assistant", "content": null}, "finish_reason": "content_filter"}]
        }))
        .unwrap();

        assert!(payload.into_completion().unwrap_err().is_transport());
    }

    #[test]
    fn test_provider_rejects_empty_key() {
        let result = OpenAiProvider::new(OpenAiConfig::new("  "));
        assert!(matches!(result, Err(DomainError::Configuration(_))));
    }

    #[test]
    fn test_config_builder() {
        let provider = OpenAiProvider::new(
            OpenAiConfig::new("sk-test")
                .with_base_url("http://localhost:8080/v1/")
                .with_model("gpt-4o")
                .with_timeout(Duration::from_secs(10)),
        )
        .unwrap();

        assert_eq!(provider.endpoint(), "http://localhost:8080/v1/chat/completions");
        assert_eq!(provider.model_id(), "gpt-4o");
        assert_eq!(provider.provider_name(), "openai");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let provider = OpenAiProvider::new(
            OpenAiConfig::new("sk-test")
                .with_base_url("http://127.0.0.1:9")
                .with_timeout(Duration::from_secs(2)),
        )
        .unwrap();

        let err = provider.complete_simple("hello").await.unwrap_err();
        assert!(err.is_transport());
        assert!(!err.to_string().contains("127.0.0.1"));
    }
}
