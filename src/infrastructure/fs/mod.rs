//! File System Implementations
//!
//! Concrete implementations of the TargetFs port.

mod remote;

pub use remote::RemoteFs;
