//! Pipeline orchestration: URL in, normalized description out

pub mod orchestrator;
pub mod stage;

pub use orchestrator::{DescriptionPipeline, GenerationResult, PipelineOutput};
pub use stage::{PipelineStage, StageTracker};
