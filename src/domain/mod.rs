//! Domain Layer
//!
//! The release model and the deploy sequence, free of any transport.
//!
//! ## Structure
//!
//! - `value_objects/` - Immutable value types (ReleaseId, ReleaseLayout, AclGrant, modes)
//! - `services/` - Pure services (Planner, env rewriting, script rendering, SharedStore)
//! - `ports/` - Interface definitions for infrastructure (TargetFs, CommandRunner, events)
//!
//! ## Design Principles
//!
//! 1. **No I/O** - Everything touching the target host goes through a port
//! 2. **Typed steps** - The deploy sequence is data (`DeployPlan`), not inline shell
//! 3. **Ports & Adapters** - SSH, local disk and test mocks are interchangeable

pub mod ports;
pub mod services;
pub mod value_objects;
