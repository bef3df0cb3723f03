//! Synthesis client
//!
//! Sends a compiled prompt to the generation backend as a single user turn and
//! classifies whatever goes wrong into [`SynthesisError`].

use crate::config;
use crate::llm::{BackendError, LLMClient, LLMRequest};
use crate::prompt::GenerationRequest;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};

/// Markers that identify a rate-limit failure, matched case-insensitively
const RATE_LIMIT_MARKERS: [&str; 6] = [
    "429",
    "rate limit",
    "rate_limit",
    "resource_exhausted",
    "quota",
    "too many requests",
];

/// Markers that identify a missing or unavailable model, matched case-insensitively
const UNAVAILABLE_MARKERS: [&str; 5] = ["404", "not found", "not_found", "unavailable", "503"];

/// Source of the generation credential, consulted on every call
pub type CredentialLookup = fn() -> Option<String>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SynthesisError {
    #[error("generation credential is not configured")]
    MissingCredential,

    #[error("generation service is rate limited: {message}")]
    RateLimited { message: String },

    #[error("generation model is unavailable: {message}")]
    ModelUnavailable { message: String },

    #[error("generation failed: {message}")]
    GenerationFailed { message: String },
}

/// Classifies a backend failure message.
///
/// Rate-limit markers win over availability markers, so a message mentioning
/// both is reported as [`SynthesisError::RateLimited`].
pub fn classify_failure(message: &str) -> SynthesisError {
    let lowered = message.to_lowercase();

    if RATE_LIMIT_MARKERS.iter().any(|m| lowered.contains(m)) {
        SynthesisError::RateLimited {
            message: message.to_string(),
        }
    } else if UNAVAILABLE_MARKERS.iter().any(|m| lowered.contains(m)) {
        SynthesisError::ModelUnavailable {
            message: message.to_string(),
        }
    } else {
        SynthesisError::GenerationFailed {
            message: message.to_string(),
        }
    }
}

impl From<BackendError> for SynthesisError {
    fn from(err: BackendError) -> Self {
        classify_failure(&err.to_string())
    }
}

pub struct SynthesisClient {
    llm: Arc<dyn LLMClient>,
    credential_lookup: CredentialLookup,
}

impl SynthesisClient {
    pub fn new(llm: Arc<dyn LLMClient>) -> Self {
        Self {
            llm,
            credential_lookup: config::generation_api_key,
        }
    }

    /// Replaces the credential source (tests use this to avoid touching the environment)
    pub fn with_credential_lookup(mut self, lookup: CredentialLookup) -> Self {
        self.credential_lookup = lookup;
        self
    }

    pub fn backend_name(&self) -> &str {
        self.llm.name()
    }

    /// Generates raw description text for `request`.
    ///
    /// # Errors
    ///
    /// [`SynthesisError::MissingCredential`] is returned before any backend
    /// call when no credential is configured. A blank payload is
    /// [`SynthesisError::GenerationFailed`].
    pub async fn generate(&self, request: &GenerationRequest) -> Result<String, SynthesisError> {
        if (self.credential_lookup)().is_none() {
            return Err(SynthesisError::MissingCredential);
        }

        debug!(
            backend = self.llm.name(),
            profile = %request.profile(),
            prompt_chars = request.prompt().chars().count(),
            "Sending generation request"
        );

        let response = self
            .llm
            .chat(LLMRequest::single_turn(request.prompt()))
            .await
            .map_err(|e| {
                error!(backend = self.llm.name(), error = %e, "Generation call failed");
                SynthesisError::from(e)
            })?;

        if response.is_blank() {
            return Err(SynthesisError::GenerationFailed {
                message: "generation service returned an empty response".to_string(),
            });
        }

        Ok(response.content)
    }
}

impl std::fmt::Debug for SynthesisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SynthesisClient")
            .field("backend", &self.llm.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::RepositoryData;
    use crate::llm::{MockLLMClient, MockResponse};
    use crate::prompt::{compile, Hints};

    fn with_key() -> Option<String> {
        Some("test-key".to_string())
    }

    fn without_key() -> Option<String> {
        None
    }

    fn request() -> GenerationRequest {
        compile(&RepositoryData::named("demo"), &Hints::none())
    }

    #[test]
    fn test_classify_rate_limit() {
        for message in [
            "HTTP 429 from upstream",
            "Rate limit exceeded",
            "RESOURCE_EXHAUSTED: quota used up",
            "Too Many Requests",
        ] {
            assert!(matches!(
                classify_failure(message),
                SynthesisError::RateLimited { .. }
            ));
        }
    }

    #[test]
    fn test_classify_unavailable() {
        for message in ["404 model gemini-x", "model NOT_FOUND", "service unavailable"] {
            assert!(matches!(
                classify_failure(message),
                SynthesisError::ModelUnavailable { .. }
            ));
        }
    }

    #[test]
    fn test_rate_limit_wins_over_unavailable() {
        assert!(matches!(
            classify_failure("429: model temporarily unavailable"),
            SynthesisError::RateLimited { .. }
        ));
    }

    #[test]
    fn test_classify_other_keeps_message() {
        assert_eq!(
            classify_failure("invalid argument"),
            SynthesisError::GenerationFailed {
                message: "invalid argument".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_missing_credential_skips_backend() {
        let llm = Arc::new(MockLLMClient::new());
        llm.add_response(MockResponse::text("unused"));
        let client = SynthesisClient::new(llm.clone()).with_credential_lookup(without_key);

        let result = client.generate(&request()).await;

        assert_eq!(result, Err(SynthesisError::MissingCredential));
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_sends_prompt_as_single_turn() {
        let llm = Arc::new(MockLLMClient::new());
        llm.add_response(MockResponse::text("A demo library."));
        let client = SynthesisClient::new(llm.clone()).with_credential_lookup(with_key);
        let request = request();

        let text = client.generate(&request).await.unwrap();

        assert_eq!(text, "A demo library.");
        assert_eq!(llm.last_prompt().as_deref(), Some(request.prompt()));
    }

    #[tokio::test]
    async fn test_blank_payload_is_failure() {
        let llm = Arc::new(MockLLMClient::new());
        llm.add_response(MockResponse::text("  \n "));
        let client = SynthesisClient::new(llm).with_credential_lookup(with_key);

        let result = client.generate(&request()).await;

        assert!(matches!(result, Err(SynthesisError::GenerationFailed { .. })));
    }

    #[tokio::test]
    async fn test_backend_failure_classified() {
        let llm = Arc::new(MockLLMClient::new());
        llm.add_response(MockResponse::api_failure("status 429 Too Many Requests"));
        let client = SynthesisClient::new(llm).with_credential_lookup(with_key);

        let result = client.generate(&request()).await;

        assert!(matches!(result, Err(SynthesisError::RateLimited { .. })));
    }

    #[tokio::test]
    async fn test_timeout_is_generation_failure() {
        let llm = Arc::new(MockLLMClient::new());
        llm.add_response(MockResponse::error(BackendError::TimeoutError { seconds: 30 }));
        let client = SynthesisClient::new(llm).with_credential_lookup(with_key);

        let result = client.generate(&request()).await;

        assert!(matches!(result, Err(SynthesisError::GenerationFailed { .. })));
    }
}
