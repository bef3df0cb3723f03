//! Inbound operation and its response envelope

use crate::error::PipelineError;
use crate::pipeline::{DescriptionPipeline, PipelineOutput};
use crate::prompt::{Hints, LANGUAGE_LIMIT};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize};

/// Body of a generate call; every field may be absent
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub features: Option<String>,
    #[serde(default)]
    pub benefits: Option<String>,
}

impl GenerateRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn hints(&self) -> Hints {
        Hints::new(self.features.clone(), self.benefits.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMetadata {
    pub name: String,
    pub languages: Vec<String>,
}

/// Response envelope: `{success: true, description, metadata}` or
/// `{success: false, error}`
///
/// The `success` flag is derived from the variant when serializing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateResponse {
    Success {
        description: String,
        metadata: ResponseMetadata,
    },
    Failure {
        error: String,
        status: u16,
    },
}

impl Serialize for GenerateResponse {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Success {
                description,
                metadata,
            } => {
                let mut state = serializer.serialize_struct("GenerateResponse", 3)?;
                state.serialize_field("success", &true)?;
                state.serialize_field("description", description)?;
                state.serialize_field("metadata", metadata)?;
                state.end()
            }
            Self::Failure { error, .. } => {
                let mut state = serializer.serialize_struct("GenerateResponse", 2)?;
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
                state.end()
            }
        }
    }
}

impl GenerateResponse {
    pub fn from_output(output: &PipelineOutput) -> Self {
        let languages = output.repository.top_languages(LANGUAGE_LIMIT).to_vec();
        GenerateResponse::Success {
            description: output.description.text.clone(),
            metadata: ResponseMetadata {
                name: output.repository.name.clone(),
                languages,
            },
        }
    }

    pub fn from_error(error: &PipelineError) -> Self {
        GenerateResponse::Failure {
            error: error.to_string(),
            status: error.status_code(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, GenerateResponse::Success { .. })
    }

    /// 200 on success, otherwise the error's mapped status
    pub fn status_code(&self) -> u16 {
        match self {
            GenerateResponse::Success { .. } => 200,
            GenerateResponse::Failure { status, .. } => *status,
        }
    }
}

/// Runs the pipeline for one inbound request and wraps the outcome in the envelope
pub async fn generate_description(
    pipeline: &DescriptionPipeline,
    request: GenerateRequest,
) -> GenerateResponse {
    let url = request.url.as_deref().unwrap_or_default();
    match pipeline.run(url, &request.hints()).await {
        Ok(output) => GenerateResponse::from_output(&output),
        Err(error) => GenerateResponse::from_error(&error),
    }
}
