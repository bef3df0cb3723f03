use serde::Serialize;
use std::fmt;
use tracing::warn;

/// Stages of one description run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Idle,
    Parsing,
    Fetching,
    Compiling,
    Generating,
    Normalizing,
    Done,
    Failed,
}

impl PipelineStage {
    /// Whether `next` may directly follow `self`.
    ///
    /// Only the stages that perform parsing or network calls can fail;
    /// compiling and normalizing are pure.
    pub fn can_transition_to(self, next: PipelineStage) -> bool {
        use PipelineStage::*;
        matches!(
            (self, next),
            (Idle, Parsing)
                | (Parsing, Fetching)
                | (Parsing, Failed)
                | (Fetching, Compiling)
                | (Fetching, Failed)
                | (Compiling, Generating)
                | (Generating, Normalizing)
                | (Generating, Failed)
                | (Normalizing, Done)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineStage::Done | PipelineStage::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PipelineStage::Idle => "idle",
            PipelineStage::Parsing => "parsing",
            PipelineStage::Fetching => "fetching",
            PipelineStage::Compiling => "compiling",
            PipelineStage::Generating => "generating",
            PipelineStage::Normalizing => "normalizing",
            PipelineStage::Done => "done",
            PipelineStage::Failed => "failed",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracks one traversal of the stage machine.
///
/// A tracker belongs to a single run; stages already visited are never
/// re-entered.
#[derive(Debug)]
pub struct StageTracker {
    current: PipelineStage,
    visited: Vec<PipelineStage>,
}

impl StageTracker {
    pub fn new() -> Self {
        Self {
            current: PipelineStage::Idle,
            visited: vec![PipelineStage::Idle],
        }
    }

    pub fn current(&self) -> PipelineStage {
        self.current
    }

    /// Moves to `next`, returning false (and staying put) when the move is not allowed
    pub fn advance(&mut self, next: PipelineStage) -> bool {
        if !self.current.can_transition_to(next) || self.visited.contains(&next) {
            warn!(from = %self.current, to = %next, "Refusing stage transition");
            return false;
        }
        self.current = next;
        self.visited.push(next);
        true
    }
}

impl Default for StageTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PipelineStage::*;

    #[test]
    fn test_happy_path() {
        let mut tracker = StageTracker::new();
        for stage in [Parsing, Fetching, Compiling, Generating, Normalizing, Done] {
            assert!(tracker.advance(stage), "failed to enter {}", stage);
        }
        assert!(tracker.current().is_terminal());
        assert!(!tracker.advance(Parsing));
        assert_eq!(tracker.current(), Done);
    }

    #[test]
    fn test_failed_reachable_only_from_io_stages() {
        assert!(Parsing.can_transition_to(Failed));
        assert!(Fetching.can_transition_to(Failed));
        assert!(Generating.can_transition_to(Failed));
        assert!(!Compiling.can_transition_to(Failed));
        assert!(!Normalizing.can_transition_to(Failed));
        assert!(!Idle.can_transition_to(Failed));
    }

    #[test]
    fn test_refuses_skips_and_terminal_exits() {
        let mut tracker = StageTracker::new();
        assert!(!tracker.advance(Fetching));
        assert_eq!(tracker.current(), Idle);

        assert!(tracker.advance(Parsing));
        assert!(tracker.advance(Failed));
        assert!(!tracker.advance(Fetching));
        assert_eq!(tracker.current(), Failed);
    }

    #[test]
    fn test_display() {
        assert_eq!(Generating.to_string(), "generating");
    }
}
