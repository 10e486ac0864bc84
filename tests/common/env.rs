//! Isolated environment for running the `cutover` binary.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Result of running a Cutover CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// A complete set of required settings, as dotenv lines
pub const COMPLETE_ENV: &str = "\
TARGET_SERVER=shop.example.com
TARGET_USER=deploy
TARGET_DIR=~/apps/shop
REPOSITORY=git@github.com:acme/shop.git
APP_NAME=\"Acme Shop\"
APP_ENV=production
APP_DEBUG=false
APP_URL=https://shop.example.com
";

/// Working directory and home directory in temp dirs.
///
/// The process environment is cleared for every run, so required settings
/// on the developer's machine never leak into a test.
pub struct TestEnv {
    pub project_root: TempDir,
    pub home_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: tempfile::tempdir().unwrap(),
            home_dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Write a file under the working directory, creating parents
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.project_path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_cutover"));
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env_clear()
            .env("HOME", self.home_dir.path())
            .env("CUTOVER_TEST_HOME", self.home_dir.path())
            .env("NO_COLOR", "1")
            .env("LANG", "C.UTF-8");

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("failed to execute cutover");
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    pub fn home(&self) -> &Path {
        self.home_dir.path()
    }
}
