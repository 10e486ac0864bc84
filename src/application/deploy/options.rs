//! Deploy Options

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Options for the deploy use case
#[derive(Debug, Clone, Default)]
pub struct DeployOptions {
    /// Where the release goes, for display (`user@host:dir`)
    pub destination: String,
    /// Set to `true` (e.g. from a Ctrl+C handler) to stop before the next step
    pub cancel: Option<Arc<AtomicBool>>,
}

impl DeployOptions {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            cancel: None,
        }
    }

    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }
}
