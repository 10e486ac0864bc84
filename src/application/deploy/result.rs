//! Deploy Result

use std::path::PathBuf;

use crate::domain::value_objects::ReleaseId;

/// Result of a completed deploy
#[derive(Debug, Clone)]
pub struct DeployResult {
    pub release: ReleaseId,
    /// Steps that performed work
    pub executed: Vec<String>,
    /// Steps that were already satisfied, with the reason
    pub skipped: Vec<(String, String)>,
    /// Archived copy of the previous `.env`, if there was one
    pub env_backup: Option<PathBuf>,
    /// Shared storage was promoted from this release (first deploy)
    pub storage_promoted: bool,
    /// The application key was generated during this deploy
    pub key_generated: bool,
}

impl DeployResult {
    pub fn new(release: ReleaseId) -> Self {
        Self {
            release,
            executed: Vec::new(),
            skipped: Vec::new(),
            env_backup: None,
            storage_promoted: false,
            key_generated: false,
        }
    }

    pub fn step_count(&self) -> usize {
        self.executed.len() + self.skipped.len()
    }

    pub fn was_skipped(&self, step: &str) -> bool {
        self.skipped.iter().any(|(name, _)| name == step)
    }
}
