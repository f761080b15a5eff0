//! ToneMessage - A message rewritten in a requested tone

use serde::{Deserialize, Serialize};

/// ToneMessage - The converted message returned to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToneMessage {
    /// Tone label the caller asked for
    pub tone: String,
    /// Rewritten message text
    pub content: String,
    /// Why this phrasing suits the receiver's personality
    pub explanation: String,
}

impl ToneMessage {
    pub fn new(
        tone: impl Into<String>,
        content: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            tone: tone.into(),
            content: content.into(),
            explanation: explanation.into(),
        }
    }
}
