//! LLM client abstraction layer
//!
//! This module provides a trait-based abstraction for talking to the generation
//! service, so the real GenAI-backed client and the in-memory mock can be used
//! interchangeably.

mod client;
mod error;
mod genai;
mod mock;
mod types;

pub use client::LLMClient;
pub use error::BackendError;
pub use genai::GenAIClient;
pub use mock::{MockLLMClient, MockResponse};
pub use types::{LLMRequest, LLMResponse};
