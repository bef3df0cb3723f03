//! aboutgen - GitHub "About" descriptions from repository metadata
//!
//! Turns a repository URL into a short, developer-facing description. The
//! hosting API supplies metadata, languages, the top-level listing, the
//! package manifest and the README; a Gemini model writes the text.
//!
//! # Pipeline
//!
//! 1. [`github::parse_repository_url`] resolves the URL to owner and repo
//! 2. [`github::MetadataAggregator`] assembles a [`github::RepositoryData`]
//! 3. [`prompt::compile`] renders it with optional [`prompt::Hints`]
//! 4. [`synthesis::SynthesisClient`] asks the model
//! 5. [`normalize::normalize`] enforces the single-line length contract
//!
//! [`pipeline::DescriptionPipeline`] runs the sequence and maps every failure
//! to [`PipelineError`].
//!
//! # Example Usage
//!
//! ```no_run
//! use aboutgen::{AboutgenConfig, DescriptionPipeline, Hints};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let pipeline = DescriptionPipeline::from_config(&AboutgenConfig::default())?;
//! let output = pipeline
//!     .run("https://github.com/facebook/react", &Hints::none())
//!     .await?;
//! println!("{}", output.description.text);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod llm;
pub mod normalize;
pub mod pipeline;
pub mod progress;
pub mod prompt;
pub mod server;
pub mod synthesis;
pub mod util;

pub use api::{generate_description, GenerateRequest, GenerateResponse};
pub use config::{AboutgenConfig, ConfigError};
pub use error::{ErrorKind, PipelineError};
pub use github::{parse_repository_url, RepositoryData, RepositoryIdentifier};
pub use pipeline::{DescriptionPipeline, GenerationResult, PipelineOutput};
pub use prompt::{GenerationRequest, Hints, Profile};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
