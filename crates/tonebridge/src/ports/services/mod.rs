//! Service Ports
//!
//! Abstract interfaces for external services and use cases.

mod llm_provider;
mod message_converter;

pub use llm_provider::*;
pub use message_converter::*;
