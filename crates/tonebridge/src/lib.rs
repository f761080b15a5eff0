//! Tonebridge Domain Library
//!
//! Core types and interfaces for rewriting a message in a requested tone,
//! tailored to the MBTI personality of the person receiving it.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure types without infrastructure dependencies
//!   - `entities/`: `ToneMessage` (the converted result)
//!   - `value_objects/`: `Mbti` and its four dimensions
//!   - `errors/`: `DomainError`
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `LlmProvider`: chat-completion backends (OpenAI, Gemini, test doubles)
//!   - `MessageConverter`: the tone conversion use case
//!
//! - **Application** (`application/`): `LlmMessageConverter`, which builds the
//!   prompt, calls an `LlmProvider` once and decodes its JSON reply.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tonebridge::{LlmMessageConverter, MessageConverter, Mbti};
//!
//! let converter = LlmMessageConverter::new(Arc::new(provider));
//! let sender: Mbti = "ESTJ".parse()?;
//! let receiver: Mbti = "INFP".parse()?;
//! let message = converter
//!     .convert("Can you send the report today?", &sender, &receiver, "formal")
//!     .await?;
//! ```

pub mod application;
pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use application::{build_prompt, receiver_traits, LlmMessageConverter};
pub use domain::{Decision, DomainError, Energy, Information, Lifestyle, Mbti, ToneMessage};
pub use ports::{
    ChatMessage, CompletionOptions, CompletionResponse, LlmProvider, MessageConverter,
    MessageRole, TokenUsage,
};
