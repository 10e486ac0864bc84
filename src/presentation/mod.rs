//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//!
//! ## Usage
//!
//! ```ignore
//! use cutover::presentation::factory;
//!
//! let (use_case, session) = factory::create_remote_deploy_use_case(&config)?;
//! let result = use_case.execute(&plan, &options);
//! session.close();
//! ```

pub mod cli;
pub mod factory;

pub use cli::{Cli, ColorWhen, Commands, ConfigArgs};
pub use factory::{create_remote_deploy_use_case, RemoteDeployUseCase};
