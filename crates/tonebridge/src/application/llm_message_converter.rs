//! LLM Message Converter
//!
//! `MessageConverter` backed by any `LlmProvider`. Each conversion is one
//! provider call; the reply must be a JSON object with `content` and
//! `explanation` string fields.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::prompt::{build_prompt, SYSTEM_PROMPT};
use crate::domain::{DomainError, Mbti, ToneMessage};
use crate::ports::{ChatMessage, CompletionOptions, LlmProvider, MessageConverter};

/// Sampling temperature used for conversions
const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Tone converter over an injected provider handle
pub struct LlmMessageConverter<P: LlmProvider + ?Sized> {
    provider: Arc<P>,
    options: CompletionOptions,
}

impl<P: LlmProvider + ?Sized> LlmMessageConverter<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            options: CompletionOptions::default().with_temperature(DEFAULT_TEMPERATURE),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.options.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.options.max_tokens = Some(max_tokens);
        self
    }
}

impl<P: LlmProvider + ?Sized> Clone for LlmMessageConverter<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            options: self.options.clone(),
        }
    }
}

#[async_trait]
impl<P: LlmProvider + ?Sized> MessageConverter for LlmMessageConverter<P> {
    async fn convert(
        &self,
        original_message: &str,
        sender_mbti: &Mbti,
        receiver_mbti: &Mbti,
        tone: &str,
    ) -> Result<ToneMessage, DomainError> {
        let prompt = build_prompt(original_message, sender_mbti, receiver_mbti, tone);
        let messages = [ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)];

        debug!(
            provider = %self.provider.provider_name(),
            model = %self.provider.model_id(),
            sender = %sender_mbti,
            receiver = %receiver_mbti,
            tone = %tone,
            message_len = original_message.len(),
            "Requesting tone conversion"
        );

        let response = self
            .provider
            .complete(&messages, &self.options)
            .await
            .inspect_err(|e| {
                warn!(provider = %self.provider.provider_name(), error = %e, "Provider call failed")
            })?;

        let (content, explanation) = parse_reply(&response.content).inspect_err(|e| {
            warn!(
                provider = %self.provider.provider_name(),
                model = %response.model,
                reply_len = response.content.len(),
                error = %e,
                "Provider reply could not be decoded"
            )
        })?;

        info!(
            model = %response.model,
            tone = %tone,
            receiver = %receiver_mbti,
            total_tokens = response.usage.total_tokens,
            "Tone conversion completed"
        );

        Ok(ToneMessage::new(tone, content, explanation))
    }
}

/// Decode the reply into `(content, explanation)`
fn parse_reply(reply: &str) -> Result<(String, String), DomainError> {
    let value: Value = serde_json::from_str(reply)?;

    let object = value.as_object().ok_or_else(|| {
        DomainError::ContractViolation("reply must be a JSON object".to_string())
    })?;

    let field = |name: &str| -> Result<String, DomainError> {
        match object.get(name) {
            Some(Value::String(text)) => Ok(text.clone()),
            Some(other) => Err(DomainError::ContractViolation(format!(
                "field '{}' must be a string, got {}",
                name, other
            ))),
            None => Err(DomainError::missing_field(name)),
        }
    };

    Ok((field("content")?, field("explanation")?))
}
