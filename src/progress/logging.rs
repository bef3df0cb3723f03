//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{debug, info, warn};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { url } => {
                info!(url = %url, "Starting description run");
            }
            ProgressEvent::StageEntered { stage } => {
                debug!(stage = %stage, "Entering stage");
            }
            ProgressEvent::EnrichmentSkipped { source, reason } => {
                info!(source = %source, reason = %reason, "Enrichment skipped");
            }
            ProgressEvent::GenerationFinished { response_time } => {
                debug!(
                    response_time_ms = response_time.as_millis(),
                    "Generation response received"
                );
            }
            ProgressEvent::Completed { total_time, length } => {
                info!(
                    length,
                    total_time_ms = total_time.as_millis(),
                    "Description generated"
                );
            }
            ProgressEvent::Failed { stage, error } => {
                warn!(stage = %stage, error = %error, "Description run failed");
            }
        }
    }
}
