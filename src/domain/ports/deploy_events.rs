//! Deploy Event Port
//!
//! Provides an observable interface for deploy operations.
//! Enables progress reporting, JSON event streams, and debugging.

use std::path::PathBuf;

/// Event emitted during deploy operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployEvent {
    /// Deploy started
    Started {
        release: String,
        destination: String,
        step_count: usize,
    },

    /// A step is about to run (`number` is 1-based)
    StepStarted {
        number: usize,
        name: String,
        description: String,
    },

    /// A step found its work already done
    StepSkipped { number: usize, reason: String },

    /// Output produced by a step's command
    StepOutput { number: usize, output: String },

    /// Configured keys with no `KEY=` line in the shared `.env`; they stay unset
    EnvKeysMissing { path: PathBuf, keys: Vec<String> },

    /// The shared `.env` was rewritten
    EnvRewritten {
        path: PathBuf,
        before: String,
        after: String,
    },

    /// A step finished successfully
    StepCompleted { number: usize },

    /// A step failed; the deploy stops here
    StepFailed { number: usize, error: String },

    /// Deploy completed
    Completed {
        release: String,
        executed_count: usize,
        skipped_count: usize,
    },
}

/// Trait for receiving deploy events
///
/// Implementations can be:
/// - ConsoleEventSink: Progress display in terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait DeployEventSink: Send + Sync {
    /// Handle a deploy event
    fn on_event(&self, event: DeployEvent);

    /// Check if this sink wants command output and `.env` diffs
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {
        // Do nothing
    }

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
