//! Caller-facing error taxonomy
//!
//! Every failure that aborts a pipeline run is one of these variants. Enrichment
//! failures never reach this type; they are swallowed inside the aggregator.

use crate::synthesis::SynthesisError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by [`crate::pipeline::DescriptionPipeline::run`]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PipelineError {
    /// Input is not a GitHub repository URL (or is blank)
    #[error("{}", invalid_url_message(.input))]
    InvalidUrl { input: String },

    /// Lookup returned 404 while a hosting credential was configured
    #[error("Repository {repository} was not found on GitHub")]
    RepoNotFound { repository: String },

    /// Repository is private, or 404'd for an anonymous caller
    #[error("{}", private_message(.repository, .explicit))]
    RepoPrivate { repository: String, explicit: bool },

    #[error("GitHub rejected the configured credential (401 Unauthorized); check GITHUB_TOKEN")]
    Unauthorized,

    #[error("GitHub denied the request (403 Forbidden); the API rate limit may be exhausted or the token lacks access")]
    Forbidden,

    /// Any other hosting failure on the critical path
    #[error("{}", upstream_message(.status, .reason, .url))]
    UpstreamError {
        status: Option<u16>,
        reason: String,
        url: String,
    },

    #[error("AI API key is missing; set GEMINI_API_KEY (or API_KEY)")]
    MissingCredential,

    #[error("The AI service is rate limited right now; please try again shortly")]
    RateLimited { message: String },

    #[error("The AI model is unavailable: {message}")]
    ModelUnavailable { message: String },

    #[error("Failed to generate description: {message}")]
    GenerationFailed { message: String },
}

/// Fieldless discriminant of [`PipelineError`] for machine consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidUrl,
    RepoNotFound,
    RepoPrivate,
    Unauthorized,
    Forbidden,
    UpstreamError,
    MissingCredential,
    RateLimited,
    ModelUnavailable,
    GenerationFailed,
}

fn invalid_url_message(input: &str) -> String {
    if input.trim().is_empty() {
        "GitHub URL is required".to_string()
    } else {
        "Invalid GitHub repository URL".to_string()
    }
}

fn private_message(repository: &str, explicit: &bool) -> String {
    if *explicit {
        format!(
            "Repository {} is private; only public repositories are supported",
            repository
        )
    } else {
        format!(
            "Repository {} was not found or is private; only public repositories are supported",
            repository
        )
    }
}

fn upstream_message(status: &Option<u16>, reason: &str, url: &str) -> String {
    match status {
        Some(code) => format!("GitHub API error: {} {} ({})", code, reason, url),
        None => format!("GitHub API request failed: {} ({})", reason, url),
    }
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::InvalidUrl { .. } => ErrorKind::InvalidUrl,
            PipelineError::RepoNotFound { .. } => ErrorKind::RepoNotFound,
            PipelineError::RepoPrivate { .. } => ErrorKind::RepoPrivate,
            PipelineError::Unauthorized => ErrorKind::Unauthorized,
            PipelineError::Forbidden => ErrorKind::Forbidden,
            PipelineError::UpstreamError { .. } => ErrorKind::UpstreamError,
            PipelineError::MissingCredential => ErrorKind::MissingCredential,
            PipelineError::RateLimited { .. } => ErrorKind::RateLimited,
            PipelineError::ModelUnavailable { .. } => ErrorKind::ModelUnavailable,
            PipelineError::GenerationFailed { .. } => ErrorKind::GenerationFailed,
        }
    }

    /// HTTP-style status for the inbound interface: 400, 429, or 500
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::InvalidUrl => 400,
            ErrorKind::RateLimited => 429,
            _ => 500,
        }
    }

    /// Returns a user-friendly error message with troubleshooting hints
    pub fn help_message(&self) -> String {
        match self {
            PipelineError::InvalidUrl { .. } => format!(
                "Error: {}\n\n\
                Help: Provide a repository URL such as:\n\
                - https://github.com/<owner>/<repo>\n\
                - https://github.com/<owner>/<repo>.git",
                self
            ),
            PipelineError::RepoPrivate { explicit: false, .. } => format!(
                "Error: {}\n\n\
                Help: GitHub answers 404 for private repositories when no token is set.\n\
                - Check the owner and repository spelling\n\
                - Set GITHUB_TOKEN to tell a missing repository apart from a private one",
                self
            ),
            PipelineError::Unauthorized => format!(
                "Error: {}\n\n\
                Help: The GITHUB_TOKEN value was rejected. Try:\n\
                - Regenerating the token\n\
                - Unsetting GITHUB_TOKEN to use anonymous access",
                self
            ),
            PipelineError::Forbidden => format!(
                "Error: {}\n\n\
                Help: Anonymous GitHub API access is limited to 60 requests per hour.\n\
                - Set GITHUB_TOKEN to raise the limit\n\
                - Wait for the rate limit window to reset",
                self
            ),
            PipelineError::MissingCredential => format!(
                "Error: {}\n\n\
                Help: Export the generation service key before running:\n\
                export GEMINI_API_KEY=your-key-here",
                self
            ),
            PipelineError::RateLimited { message } => format!(
                "Error: {}\n\n\
                Help: Wait a few seconds and run the command again.\n\n\
                Details: {}",
                self, message
            ),
            PipelineError::ModelUnavailable { .. } => format!(
                "Error: {}\n\n\
                Help: Try another model with --model or ABOUTGEN_MODEL.",
                self
            ),
            _ => format!("Error: {}", self),
        }
    }
}

impl From<SynthesisError> for PipelineError {
    fn from(err: SynthesisError) -> Self {
        match err {
            SynthesisError::MissingCredential => PipelineError::MissingCredential,
            SynthesisError::RateLimited { message } => PipelineError::RateLimited { message },
            SynthesisError::ModelUnavailable { message } => {
                PipelineError::ModelUnavailable { message }
            }
            SynthesisError::GenerationFailed { message } => {
                PipelineError::GenerationFailed { message }
            }
        }
    }
}
