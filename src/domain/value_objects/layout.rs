//! Directory layout of a target, as seen from one release

use std::path::{Path, PathBuf};

use super::ReleaseId;

/// Default name of the live-release symlink
pub const DEFAULT_SYMLINK: &str = "current";

/// Paths produced under the target directory:
///
/// ```text
/// <root>/<release>/          one checkout per deploy
/// <root>/.env                shared environment file
/// <root>/.env-<release>.bak  archived copies of .env
/// <root>/storage/            shared storage directory
/// <root>/current -> <release>
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseLayout {
    root: PathBuf,
    release: ReleaseId,
    symlink: String,
}

impl ReleaseLayout {
    pub fn new(root: impl Into<PathBuf>, release: ReleaseId) -> Self {
        Self {
            root: root.into(),
            release,
            symlink: DEFAULT_SYMLINK.to_string(),
        }
    }

    pub fn with_symlink(mut self, name: impl Into<String>) -> Self {
        self.symlink = name.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn release(&self) -> &ReleaseId {
        &self.release
    }

    pub fn release_dir(&self) -> PathBuf {
        self.root.join(self.release.as_str())
    }

    pub fn current(&self) -> PathBuf {
        self.root.join(&self.symlink)
    }

    pub fn shared_env(&self) -> PathBuf {
        self.root.join(".env")
    }

    pub fn env_backup(&self) -> PathBuf {
        self.root.join(self.release.env_backup_name())
    }

    pub fn env_example(&self) -> PathBuf {
        self.release_dir().join(".env.example")
    }

    pub fn shared_storage(&self) -> PathBuf {
        self.root.join("storage")
    }

    pub fn release_storage(&self) -> PathBuf {
        self.release_dir().join("storage")
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.release_dir().join("bootstrap").join("cache")
    }
}
