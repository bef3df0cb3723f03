//! Progress handler trait and events

use crate::pipeline::PipelineStage;
use std::time::Duration;

/// Events emitted while a description is produced
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Run started for the given input
    Started { url: String },

    /// Pipeline moved into a new stage
    StageEntered { stage: PipelineStage },

    /// An optional enrichment source was skipped
    EnrichmentSkipped { source: String, reason: String },

    /// Generation call returned
    GenerationFinished { response_time: Duration },

    /// Description produced
    Completed { total_time: Duration, length: usize },

    /// Run aborted in `stage`
    Failed { stage: PipelineStage, error: String },
}

/// Trait for handling progress events during a run
pub trait ProgressHandler: Send + Sync {
    /// Called when a progress event occurs
    fn on_progress(&self, event: &ProgressEvent);
}
