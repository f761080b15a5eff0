//! Message Converter Port
//!
//! The tone conversion use case as consumed by higher layers.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, Mbti, ToneMessage};

/// Rewrites a message in a given tone for a specific receiver
#[async_trait]
pub trait MessageConverter: Send + Sync {
    /// Convert `original_message` into `tone`, tailored to `receiver_mbti`
    async fn convert(
        &self,
        original_message: &str,
        sender_mbti: &Mbti,
        receiver_mbti: &Mbti,
        tone: &str,
    ) -> Result<ToneMessage, DomainError>;
}
