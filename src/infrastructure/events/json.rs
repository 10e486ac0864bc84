//! JSON Event Sink
//!
//! Outputs deploy events as NDJSON for CI/automation consumption.

use crate::domain::ports::{DeployEvent, DeployEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// NDJSON form of an event. `.env` contents are never included.
pub fn event_json(event: &DeployEvent) -> serde_json::Value {
    match event {
        DeployEvent::Started {
            release,
            destination,
            step_count,
        } => serde_json::json!({
            "event": "start",
            "command": "deploy",
            "version": env!("CARGO_PKG_VERSION"),
            "release": release,
            "destination": destination,
            "steps": step_count,
        }),

        DeployEvent::StepStarted {
            number,
            name,
            description,
        } => serde_json::json!({
            "event": "step_started",
            "command": "deploy",
            "step": number,
            "name": name,
            "description": description,
        }),

        DeployEvent::StepSkipped { number, reason } => serde_json::json!({
            "event": "step_skipped",
            "command": "deploy",
            "step": number,
            "reason": reason,
        }),

        DeployEvent::StepOutput { number, output } => serde_json::json!({
            "event": "step_output",
            "command": "deploy",
            "step": number,
            "output": output,
        }),

        DeployEvent::EnvKeysMissing { path, keys } => serde_json::json!({
            "event": "env_keys_missing",
            "command": "deploy",
            "path": path.display().to_string(),
            "missing_keys": keys,
        }),

        DeployEvent::EnvRewritten { path, .. } => serde_json::json!({
            "event": "env_rewritten",
            "command": "deploy",
            "path": path.display().to_string(),
        }),

        DeployEvent::StepCompleted { number } => serde_json::json!({
            "event": "step_completed",
            "command": "deploy",
            "step": number,
        }),

        DeployEvent::StepFailed { number, error } => serde_json::json!({
            "event": "step_failed",
            "command": "deploy",
            "step": number,
            "error": error,
        }),

        DeployEvent::Completed {
            release,
            executed_count,
            skipped_count,
        } => serde_json::json!({
            "event": "complete",
            "command": "deploy",
            "status": "success",
            "release": release,
            "executed": executed_count,
            "skipped": skipped_count,
        }),
    }
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        self.write_event(event_json(&event));
    }
}
