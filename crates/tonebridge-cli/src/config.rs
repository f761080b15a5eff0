//! Configuration management for Tonebridge CLI
//!
//! Stores provider choice, API keys and defaults in ~/.config/tonebridge/config.toml.
//! `OPENAI_API_KEY`, `GEMINI_API_KEY` and `TONEBRIDGE_PROVIDER` override the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const CONFIG_DIR: &str = "tonebridge";
const CONFIG_FILE: &str = "config.toml";

/// Which chat-completion backend to use
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    OpenAI,
    Gemini,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::OpenAI => write!(f, "openai"),
            ProviderKind::Gemini => write!(f, "gemini"),
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAI),
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// CLI Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gemini_api_key: Option<String>,
    /// Model override; each provider has its own default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_tone")]
    pub default_tone: String,
}

fn default_tone() -> String {
    "formal".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            openai_api_key: None,
            gemini_api_key: None,
            model: None,
            base_url: None,
            timeout_secs: None,
            default_tone: default_tone(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from file (or defaults), then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load only what is stored on disk
    pub fn load_file() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| "Failed to parse config file")
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;

        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Apply environment-style overrides from `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty("OPENAI_API_KEY") {
            self.openai_api_key = Some(key);
        }
        if let Some(key) = non_empty("GEMINI_API_KEY") {
            self.gemini_api_key = Some(key);
        }
        if let Some(provider) = non_empty("TONEBRIDGE_PROVIDER") {
            match provider.parse() {
                Ok(kind) => self.provider = kind,
                Err(e) => tracing::warn!(error = %e, "Ignoring TONEBRIDGE_PROVIDER"),
            }
        }
    }

    /// Store an API key for a provider
    pub fn set_api_key(&mut self, provider: ProviderKind, key: String) {
        match provider {
            ProviderKind::OpenAI => self.openai_api_key = Some(key),
            ProviderKind::Gemini => self.gemini_api_key = Some(key),
        }
    }

    /// API key for the active provider
    pub fn api_key(&self) -> Option<&str> {
        match self.provider {
            ProviderKind::OpenAI => self.openai_api_key.as_deref(),
            ProviderKind::Gemini => self.gemini_api_key.as_deref(),
        }
    }
}

/// Mask a secret for display, keeping the first and last four characters
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_from_empty_file() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.provider, ProviderKind::OpenAI);
        assert_eq!(config.default_tone, "formal");
        assert!(config.api_key().is_none());
    }

    #[test]
    fn test_parse_file() {
        let config = Config::from_toml_str(
            r#"
provider = "gemini"
gemini_api_key = "g-key"
model = "gemini-1.5-pro"
timeout_secs = 20
default_tone = "casual"
"#,
        )
        .unwrap();

        assert_eq!(config.provider, ProviderKind::Gemini);
        assert_eq!(config.api_key(), Some("g-key"));
        assert_eq!(config.model.as_deref(), Some("gemini-1.5-pro"));
        assert_eq!(config.timeout_secs, Some(20));
        assert_eq!(config.default_tone, "casual");
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = Config::from_toml_str(r#"openai_api_key = "from-file""#).unwrap();
        let env: HashMap<&str, &str> = [
            ("OPENAI_API_KEY", "from-env"),
            ("GEMINI_API_KEY", ""),
            ("TONEBRIDGE_PROVIDER", "nope"),
        ]
        .into_iter()
        .collect();

        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.openai_api_key.as_deref(), Some("from-env"));
        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.provider, ProviderKind::OpenAI);
    }

    #[test]
    fn test_save_format_round_trips() {
        let mut config = Config::default();
        config.set_api_key(ProviderKind::Gemini, "g-key".to_string());
        let text = toml::to_string_pretty(&config).unwrap();

        assert!(text.contains("provider = \"openai\""));
        assert!(!text.contains("openai_api_key"));
        let back = Config::from_toml_str(&text).unwrap();
        assert_eq!(back.gemini_api_key.as_deref(), Some("g-key"));
    }

    #[test]
    fn test_provider_kind_parse() {
        assert_eq!("OpenAI".parse::<ProviderKind>(), Ok(ProviderKind::OpenAI));
        assert_eq!("google".parse::<ProviderKind>(), Ok(ProviderKind::Gemini));
        assert!("anthropic".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("sk-abcdefghijkl"), "sk-a...ijkl");
        assert_eq!(mask_secret("short"), "*****");
    }
}
