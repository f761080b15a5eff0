//! Application Layer (Use Cases)
//!
//! Orchestrates domain types and the LLM provider port.

mod llm_message_converter;
mod prompt;

pub use llm_message_converter::LlmMessageConverter;
pub use prompt::{build_prompt, receiver_traits};
