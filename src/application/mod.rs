//! Application Layer
//!
//! Use cases that orchestrate the deploy flow.
//! This layer:
//! - Depends on Domain layer (services, ports, value objects)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `DeployUseCase` - Runs a deploy plan against the target (ensure, clone,
//!   share, cut over, finalize)

pub mod deploy;

pub use deploy::{DeployOptions, DeployResult, DeployUseCase};
