//! TargetFs port - file operations on the deploy target
//!
//! The orchestrator only inspects and rearranges paths under the target
//! directory through this trait, so the same sequence runs against an SSH
//! host, a local directory, or an in-memory mock.

use std::path::{Path, PathBuf};

/// Result type for target file system operations
pub type FsResult<T> = Result<T, FsError>;

/// Target file system errors
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    /// Path not found
    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Path already exists where a new entry was expected
    #[error("already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// Permission denied
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// Local I/O error
    #[error("I/O error: {0}")]
    Io(std::io::Error),

    /// Remote shell command failed
    #[error("`{command}` failed{}: {}", .status.map(|s| format!(" with exit status {s}")).unwrap_or_default(), .stderr.trim())]
    Command {
        command: String,
        status: Option<i32>,
        stderr: String,
    },
}

impl FsError {
    /// Convert an io::Error, keeping the path for the common kinds
    pub fn from_io(err: std::io::Error, path: &Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::AlreadyExists => FsError::AlreadyExists(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io(err),
        }
    }
}

/// Abstract target file system
///
/// Paths are interpreted relative to the target user's home directory when
/// they are not absolute (that is where an SSH session starts).
///
/// Implementations:
/// - `RemoteFs` - one SSH command per operation
/// - test mocks - in-memory or tempdir-backed
pub trait TargetFs {
    /// Regular file exists (symlinks are followed)
    fn is_file(&self, path: &Path) -> FsResult<bool>;

    /// Directory exists (symlinks are followed)
    fn is_dir(&self, path: &Path) -> FsResult<bool>;

    /// Path is a symlink, dangling or not
    fn is_symlink(&self, path: &Path) -> FsResult<bool>;

    fn read(&self, path: &Path) -> FsResult<String>;

    /// Replace file content (write-then-rename)
    fn write(&self, path: &Path, content: &str) -> FsResult<()>;

    /// Create directory and parents
    fn create_dir_all(&self, path: &Path) -> FsResult<()>;

    fn copy(&self, from: &Path, to: &Path) -> FsResult<()>;

    /// Move a file or directory
    fn rename(&self, from: &Path, to: &Path) -> FsResult<()>;

    /// Remove a directory tree
    fn remove_dir_all(&self, path: &Path) -> FsResult<()>;

    /// Remove a symlink without touching what it points at
    fn remove_link(&self, path: &Path) -> FsResult<()>;

    /// Create `link` pointing at `target`; `target` is stored verbatim so
    /// relative targets resolve against the link's directory.
    fn symlink(&self, target: &Path, link: &Path) -> FsResult<()>;

    /// Point `link` at `target` in a single rename, with no moment where
    /// `link` is missing.
    fn replace_symlink(&self, target: &Path, link: &Path) -> FsResult<()>;
}
