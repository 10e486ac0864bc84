//! Common test utilities for Cutover integration tests.
//!
//! This module provides:
//! - `TestEnv`: isolated working and home directories plus CLI helpers
//! - `LocalFs` / `FakeRunner`: a tempdir standing in for the deploy target

#![allow(dead_code)]

pub mod env;
pub mod target;

pub use env::*;
pub use target::*;
