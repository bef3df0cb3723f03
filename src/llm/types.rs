//! LLM communication types
//!
//! Descriptions are produced from a single user turn: no system prompt, no
//! sampling overrides and no tool-calling surface.

use std::time::Duration;

/// Request to send to the LLM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LLMRequest {
    /// Text of the single user turn
    pub prompt: String,
}

impl LLMRequest {
    /// Single user turn carrying `prompt`
    pub fn single_turn(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

/// Response from the LLM
#[derive(Debug, Clone)]
pub struct LLMResponse {
    /// Text content of the response; empty when the provider returned no text
    pub content: String,
    /// Time taken for the request
    pub response_time: Duration,
}

impl LLMResponse {
    pub fn text(content: impl Into<String>, response_time: Duration) -> Self {
        Self {
            content: content.into(),
            response_time,
        }
    }

    /// True when the payload is missing or whitespace only
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}
