//! Shared state that outlives any single release
//!
//! Two named slots live at the target root: the `.env` file and the
//! `storage/` directory. Exactly one authoritative copy of each exists
//! there; releases link to it instead of owning one.

use std::path::{Path, PathBuf};

use crate::domain::ports::{FsResult, TargetFs};
use crate::domain::value_objects::EnvBackupMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SharedSlot {
    Env,
    Storage,
}

impl SharedSlot {
    /// Entry name, both at the root and inside a release
    pub fn name(self) -> &'static str {
        match self {
            SharedSlot::Env => ".env",
            SharedSlot::Storage => "storage",
        }
    }
}

/// Slot operations addressed by the target directory
pub struct SharedStore<'a, FS: TargetFs + ?Sized> {
    fs: &'a FS,
    root: &'a Path,
}

impl<'a, FS: TargetFs + ?Sized> SharedStore<'a, FS> {
    pub fn new(fs: &'a FS, root: &'a Path) -> Self {
        Self { fs, root }
    }

    pub fn path(&self, slot: SharedSlot) -> PathBuf {
        self.root.join(slot.name())
    }

    pub fn exists(&self, slot: SharedSlot) -> FsResult<bool> {
        let path = self.path(slot);
        match slot {
            SharedSlot::Env => self.fs.is_file(&path),
            SharedSlot::Storage => self.fs.is_dir(&path),
        }
    }

    pub fn read_env(&self) -> FsResult<String> {
        self.fs.read(&self.path(SharedSlot::Env))
    }

    pub fn write_env(&self, content: &str) -> FsResult<()> {
        self.fs.write(&self.path(SharedSlot::Env), content)
    }

    /// Archive the shared `.env` to `backup`. Returns `false` when there
    /// was nothing to archive.
    pub fn archive_env(&self, backup: &Path, mode: EnvBackupMode) -> FsResult<bool> {
        if !self.exists(SharedSlot::Env)? {
            return Ok(false);
        }
        let env = self.path(SharedSlot::Env);
        match mode {
            EnvBackupMode::Copy => self.fs.copy(&env, backup)?,
            EnvBackupMode::Move => self.fs.rename(&env, backup)?,
        }
        Ok(true)
    }

    /// Seed a slot from a release's default. The env file is copied (the
    /// example stays in the release); storage is moved.
    pub fn promote(&self, slot: SharedSlot, from: &Path) -> FsResult<()> {
        let to = self.path(slot);
        match slot {
            SharedSlot::Env => self.fs.copy(from, &to),
            SharedSlot::Storage => self.fs.rename(from, &to),
        }
    }

    /// Link `<release_dir>/<slot>` to the shared slot with a relative target
    pub fn link(&self, slot: SharedSlot, release_dir: &Path) -> FsResult<()> {
        let target = Path::new("..").join(slot.name());
        self.fs.symlink(&target, &release_dir.join(slot.name()))
    }
}
