//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod command_runner;
pub mod deploy_events;
pub mod target_fs;

pub use command_runner::{CommandOutput, CommandRunner, CommandSpec, RunnerError, RunnerResult};
pub use deploy_events::{DeployEvent, DeployEventSink, NoopEventSink};
pub use target_fs::{FsError, FsResult, TargetFs};
