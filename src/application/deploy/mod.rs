//! Deploy Module
//!
//! Orchestrates the release deployment for Cutover.
//!
//! ## Structure
//!
//! - `options` - Run options (`DeployOptions`)
//! - `result` - Result types (`DeployResult`)
//! - `use_case` - Core use case logic (`DeployUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use cutover::application::deploy::{DeployOptions, DeployUseCase};
//!
//! let use_case = DeployUseCase::new(fs, runner);
//! let result = use_case.execute(&plan, &DeployOptions::new("deploy@host:apps/shop"))?;
//! ```

mod options;
mod result;
mod use_case;

pub use options::DeployOptions;
pub use result::DeployResult;
pub use use_case::DeployUseCase;
