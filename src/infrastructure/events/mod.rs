//! Event Sink Implementations
//!
//! Provides concrete implementations of DeployEventSink:
//! - JsonEventSink: NDJSON output for CI/automation
//!
//! The human console sink lives with the CLI views.

mod json;

pub use json::JsonEventSink;
