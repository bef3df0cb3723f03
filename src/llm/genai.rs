//! GenAI-based LLM client implementation
//!
//! Uses the `genai` crate, which picks the provider adapter from the model name
//! (`gemini-*` models go to Google's Gemini API). The API key is resolved on
//! every request from the process environment instead of being captured at
//! construction time.

use super::client::LLMClient;
use super::error::BackendError;
use super::types::{LLMRequest, LLMResponse};
use crate::config;
use async_trait::async_trait;
use genai::chat::{ChatMessage as GenAIChatMessage, ChatRequest as GenAIChatRequest};
use genai::resolver::{AuthData, ServiceTargetResolver};
use genai::{Client, ServiceTarget};
use std::time::{Duration, Instant};
use tracing::{debug, error};

/// GenAI-backed generation client
pub struct GenAIClient {
    client: Client,
    model: String,
    timeout: Duration,
}

impl GenAIClient {
    /// Creates a new GenAI client
    ///
    /// # Arguments
    ///
    /// * `model` - Model name, e.g. `gemini-2.5-flash`
    /// * `timeout` - Request timeout
    pub fn new(model: impl Into<String>, timeout: Duration) -> Self {
        let model = model.into();

        let resolver = ServiceTargetResolver::from_resolver_fn(
            |service_target: ServiceTarget| -> Result<ServiceTarget, genai::resolver::Error> {
                let key = config::generation_api_key().unwrap_or_default();
                Ok(ServiceTarget {
                    auth: AuthData::from_single(key),
                    ..service_target
                })
            },
        );

        let client = Client::builder()
            .with_service_target_resolver(resolver)
            .build();

        debug!(model = %model, timeout_secs = timeout.as_secs(), "Creating GenAI client");

        Self {
            client,
            model,
            timeout,
        }
    }

    fn build_request(request: &LLMRequest) -> GenAIChatRequest {
        GenAIChatRequest::new(vec![GenAIChatMessage::user(request.prompt.as_str())])
    }
}

#[async_trait]
impl LLMClient for GenAIClient {
    async fn chat(&self, request: LLMRequest) -> Result<LLMResponse, BackendError> {
        let start = Instant::now();

        let genai_request = Self::build_request(&request);

        let response = match tokio::time::timeout(
            self.timeout,
            self.client
                .exec_chat(&self.model, genai_request, None),
        )
        .await
        {
            Ok(Ok(resp)) => resp,
            Ok(Err(e)) => {
                error!(model = %self.model, "Generation API error: {}", e);
                return Err(BackendError::ApiError {
                    message: format!("{} request failed: {}", self.model, e),
                    status_code: None,
                });
            }
            Err(_) => {
                error!(
                    model = %self.model,
                    "Generation request timed out after {}s",
                    self.timeout.as_secs()
                );
                return Err(BackendError::TimeoutError {
                    seconds: self.timeout.as_secs(),
                });
            }
        };

        let content = response.first_text().unwrap_or_default().to_string();
        debug!(
            model = %self.model,
            chars = content.chars().count(),
            elapsed_ms = start.elapsed().as_millis(),
            "Generation response received"
        );

        Ok(LLMResponse::text(content, start.elapsed()))
    }

    fn name(&self) -> &str {
        "GenAI"
    }
}

impl std::fmt::Debug for GenAIClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenAIClient")
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}
