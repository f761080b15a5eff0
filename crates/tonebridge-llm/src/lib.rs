//! LLM Providers for Tonebridge
//!
//! `LlmProvider` implementations that talk to hosted chat-completion APIs
//! over HTTP.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tonebridge::LlmMessageConverter;
//! use tonebridge_llm::{OpenAiConfig, OpenAiProvider};
//!
//! let provider = OpenAiProvider::new(OpenAiConfig::new(api_key))?;
//! let converter = LlmMessageConverter::new(Arc::new(provider));
//! ```

mod gemini;
mod http;
mod openai;

pub use gemini::{GeminiConfig, GeminiProvider};
pub use openai::{OpenAiConfig, OpenAiProvider};
