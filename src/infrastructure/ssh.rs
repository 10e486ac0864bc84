//! SSH session
//!
//! Every remote operation is one `ssh user@host '<command>'` invocation.
//! With multiplexing on, the first invocation opens a ControlMaster and the
//! rest of the run reuses it, so a deploy authenticates once.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::Arc;

use tempfile::TempDir;
use tracing::{debug, trace};

use crate::config::SshSettings;
use crate::domain::ports::{CommandOutput, CommandRunner, CommandSpec, RunnerError, RunnerResult};

/// Connection to one target host as one user
#[derive(Debug, Clone)]
pub struct SshSession {
    /// `user@host`
    destination: String,
    port: Option<u16>,
    identity_file: Option<PathBuf>,
    /// Holds the ControlMaster socket; removed when the last clone drops
    control_dir: Option<Arc<TempDir>>,
}

impl SshSession {
    pub fn new(destination: impl Into<String>, settings: &SshSettings) -> std::io::Result<Self> {
        let control_dir = if settings.multiplex {
            Some(Arc::new(
                tempfile::Builder::new().prefix("cutover-ssh").tempdir()?,
            ))
        } else {
            None
        };

        Ok(Self {
            destination: destination.into(),
            port: settings.port,
            identity_file: settings.identity_file.clone(),
            control_dir,
        })
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    fn control_path(&self) -> Option<PathBuf> {
        self.control_dir.as_ref().map(|dir| dir.path().join("%C"))
    }

    /// Options placed before the destination
    pub(crate) fn ssh_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(port) = self.port {
            args.push("-p".to_string());
            args.push(port.to_string());
        }
        if let Some(identity) = &self.identity_file {
            args.push("-i".to_string());
            args.push(identity.to_string_lossy().into_owned());
        }
        if let Some(path) = self.control_path() {
            args.extend([
                "-o".to_string(),
                "ControlMaster=auto".to_string(),
                "-o".to_string(),
                format!("ControlPath={}", path.display()),
                "-o".to_string(),
                "ControlPersist=60".to_string(),
            ]);
        }
        args
    }

    /// Run a shell command line on the host, optionally feeding `input`
    pub fn exec(&self, command: &str, input: Option<&str>) -> RunnerResult<CommandOutput> {
        let args = self.ssh_args();
        trace!(destination = %self.destination, ?args, command, "ssh");

        let spawn_error = |source| RunnerError::Spawn {
            program: "ssh".to_string(),
            source,
        };

        let mut child = Command::new("ssh")
            .args(&args)
            .arg(&self.destination)
            .arg(command)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        if let Some(data) = input {
            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(data.as_bytes()).map_err(spawn_error)?;
            }
        }

        let output = child.wait_with_output().map_err(spawn_error)?;
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(RunnerError::Failed {
                command: command.to_string(),
                status: output.status.code(),
                stderr,
            });
        }

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr,
        })
    }

    /// Shut down the ControlMaster, if one was started
    pub fn close(&self) {
        let Some(path) = self.control_path() else {
            return;
        };
        let status = Command::new("ssh")
            .arg("-O")
            .arg("exit")
            .arg("-o")
            .arg(format!("ControlPath={}", path.display()))
            .arg(&self.destination)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        debug!(destination = %self.destination, ?status, "closed ssh master");
    }
}

impl CommandRunner for SshSession {
    fn run(&self, command: &CommandSpec) -> RunnerResult<CommandOutput> {
        self.exec(&command.to_shell(), None)
    }
}
