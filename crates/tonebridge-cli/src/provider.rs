//! Provider construction from CLI configuration

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tonebridge::LlmProvider;
use tonebridge_llm::{GeminiConfig, GeminiProvider, OpenAiConfig, OpenAiProvider};

use crate::config::{Config, ProviderKind};

/// Build the configured provider as a shared handle
pub fn build_provider(config: &Config) -> Result<Arc<dyn LlmProvider>> {
    let api_key = config.api_key().with_context(|| {
        format!(
            "No {} API key configured. Run `tonebridge login --provider {}` or set {}",
            config.provider,
            config.provider,
            env_var_for(config.provider)
        )
    })?;
    let timeout = config.timeout_secs.map(Duration::from_secs);

    let provider: Arc<dyn LlmProvider> = match config.provider {
        ProviderKind::OpenAI => {
            let mut openai = OpenAiConfig::new(api_key);
            if let Some(model) = &config.model {
                openai = openai.with_model(model);
            }
            if let Some(base_url) = &config.base_url {
                openai = openai.with_base_url(base_url);
            }
            if let Some(timeout) = timeout {
                openai = openai.with_timeout(timeout);
            }
            Arc::new(OpenAiProvider::new(openai)?)
        }
        ProviderKind::Gemini => {
            let mut gemini = GeminiConfig::new(api_key);
            if let Some(model) = &config.model {
                gemini = gemini.with_model(model);
            }
            if let Some(base_url) = &config.base_url {
                gemini = gemini.with_base_url(base_url);
            }
            if let Some(timeout) = timeout {
                gemini = gemini.with_timeout(timeout);
            }
            Arc::new(GeminiProvider::new(gemini)?)
        }
    };

    tracing::debug!(
        provider = %provider.provider_name(),
        model = %provider.model_id(),
        "Provider ready"
    );

    Ok(provider)
}

pub fn env_var_for(provider: ProviderKind) -> &'static str {
    match provider {
        ProviderKind::OpenAI => "OPENAI_API_KEY",
        ProviderKind::Gemini => "GEMINI_API_KEY",
    }
}
