//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O with the target host.
//!
//! ## Structure
//!
//! - `ssh` - `SshSession`, the `CommandRunner` used in production
//! - `fs/` - `RemoteFs`, the `TargetFs` over the same session
//! - `events/` - `JsonEventSink` for NDJSON progress

pub mod events;
pub mod fs;
pub mod ssh;

pub use events::JsonEventSink;
pub use fs::RemoteFs;
pub use ssh::SshSession;
