//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod acl;
mod layout;
mod modes;
mod release;

pub use acl::AclGrant;
pub use layout::{ReleaseLayout, DEFAULT_SYMLINK};
pub use modes::{CutoverMode, EnvBackupMode};
pub use release::ReleaseId;
