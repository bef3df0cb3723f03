use super::stage::{PipelineStage, StageTracker};
use crate::config::{AboutgenConfig, ConfigError};
use crate::error::PipelineError;
use crate::github::{parse_repository_url, GitHubApi, MetadataAggregator, RepositoryData, RepositoryHost};
use crate::llm::{GenAIClient, LLMClient};
use crate::normalize::normalize;
use crate::progress::{ProgressEvent, ProgressHandler};
use crate::prompt::{compile, Hints, Profile};
use crate::synthesis::{CredentialLookup, SynthesisClient};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Normalized description text; single line, within the profile's cap
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationResult {
    pub text: String,
}

/// Everything a successful run produced
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub description: GenerationResult,
    pub repository: RepositoryData,
    pub profile: Profile,
}

/// Sequences URL parsing, aggregation, compilation, generation and
/// normalization.
///
/// Holds no per-request state: every [`run`](Self::run) is an independent
/// traversal, so one pipeline can serve concurrent callers.
pub struct DescriptionPipeline {
    aggregator: MetadataAggregator,
    synthesis: SynthesisClient,
    progress: Option<Arc<dyn ProgressHandler>>,
}

impl DescriptionPipeline {
    pub fn new(host: Arc<dyn RepositoryHost>, llm: Arc<dyn LLMClient>) -> Self {
        Self {
            aggregator: MetadataAggregator::new(host),
            synthesis: SynthesisClient::new(llm),
            progress: None,
        }
    }

    /// Builds the production pipeline: GitHub over reqwest, generation through genai
    pub fn from_config(config: &AboutgenConfig) -> Result<Self, ConfigError> {
        let host = GitHubApi::new(config.github_api_url.clone(), config.request_timeout())
            .map_err(|e| ConfigError::HostInitError(e.to_string()))?;
        let llm = GenAIClient::new(config.model.clone(), config.request_timeout());

        info!(
            host = %host.base_url(),
            model = %config.model,
            "Description pipeline configured"
        );

        Ok(Self::new(Arc::new(host), Arc::new(llm)))
    }

    pub fn with_progress(mut self, handler: Arc<dyn ProgressHandler>) -> Self {
        self.aggregator = self.aggregator.with_progress(handler.clone());
        self.progress = Some(handler);
        self
    }

    pub fn with_credential_lookup(mut self, lookup: CredentialLookup) -> Self {
        self.synthesis = self.synthesis.with_credential_lookup(lookup);
        self
    }

    /// Produces a description for the repository at `url`.
    ///
    /// An unparsable URL fails with [`PipelineError::InvalidUrl`] before any
    /// network call. No partial result is ever returned.
    pub async fn run(&self, url: &str, hints: &Hints) -> Result<PipelineOutput, PipelineError> {
        let start = Instant::now();
        let mut tracker = StageTracker::new();
        self.emit(ProgressEvent::Started {
            url: url.to_string(),
        });

        self.enter(&mut tracker, PipelineStage::Parsing);
        let Some(id) = parse_repository_url(url) else {
            return Err(self.fail(
                &mut tracker,
                PipelineError::InvalidUrl {
                    input: url.to_string(),
                },
            ));
        };
        debug!(repository = %id, "Parsed repository URL");

        self.enter(&mut tracker, PipelineStage::Fetching);
        let repository = match self.aggregator.fetch(&id).await {
            Ok(data) => data,
            Err(e) => return Err(self.fail(&mut tracker, e)),
        };

        self.enter(&mut tracker, PipelineStage::Compiling);
        let request = compile(&repository, hints);
        let profile = request.profile();
        debug!(profile = %profile, "Prompt compiled");

        self.enter(&mut tracker, PipelineStage::Generating);
        let generation_start = Instant::now();
        let raw = match self.synthesis.generate(&request).await {
            Ok(raw) => raw,
            Err(e) => return Err(self.fail(&mut tracker, e.into())),
        };
        self.emit(ProgressEvent::GenerationFinished {
            response_time: generation_start.elapsed(),
        });
        let text = normalize(&raw, request.max_length());
        if text.is_empty() {
            return Err(self.fail(
                &mut tracker,
                PipelineError::GenerationFailed {
                    message: "generation service returned no usable text".to_string(),
                },
            ));
        }

        self.enter(&mut tracker, PipelineStage::Normalizing);

        self.enter(&mut tracker, PipelineStage::Done);
        let length = text.chars().count();
        info!(
            repository = %id,
            profile = %profile,
            length,
            "Description generated"
        );
        self.emit(ProgressEvent::Completed {
            total_time: start.elapsed(),
            length,
        });

        Ok(PipelineOutput {
            description: GenerationResult { text },
            repository,
            profile,
        })
    }

    fn enter(&self, tracker: &mut StageTracker, stage: PipelineStage) {
        let accepted = tracker.advance(stage);
        debug_assert!(accepted, "invalid stage transition to {}", stage);
        self.emit(ProgressEvent::StageEntered { stage });
    }

    fn fail(&self, tracker: &mut StageTracker, error: PipelineError) -> PipelineError {
        let stage = tracker.current();
        warn!(stage = %stage, kind = ?error.kind(), "{}", error);
        tracker.advance(PipelineStage::Failed);
        self.emit(ProgressEvent::Failed {
            stage,
            error: error.to_string(),
        });
        error
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(handler) = &self.progress {
            handler.on_progress(&event);
        }
    }
}

impl std::fmt::Debug for DescriptionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescriptionPipeline")
            .field("host", &self.aggregator.host_name())
            .field("synthesis", &self.synthesis)
            .finish()
    }
}
