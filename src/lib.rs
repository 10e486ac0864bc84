//! Cutover - symlink-swap release deployments over SSH
//!
//! Each deploy clones the repository into a fresh timestamped release
//! directory next to the previous ones, wires it to the state shared by all
//! releases (`.env` and `storage/`), points the `current` symlink at it and
//! finishes the application setup. Old releases stay on disk.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

// Re-exports for convenience
pub use application::{DeployOptions, DeployResult, DeployUseCase};
pub use config::{DeployConfig, LoadOptions, Settings};
pub use domain::ports::{CommandRunner, DeployEvent, DeployEventSink, TargetFs};
pub use domain::services::{render_script, DeployPlan, Planner, Step};
pub use domain::value_objects::{ReleaseId, ReleaseLayout};
pub use error::{ConfigError, CutoverError, CutoverResult};
