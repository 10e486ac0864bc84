//! CommandRunner port - running external tools on the target host
//!
//! git, setfacl, composer, artisan and systemctl are all invoked through
//! this trait. The SSH session implements it for production; tests use
//! recording mocks.

use std::fmt;
use std::path::{Path, PathBuf};

/// Result type for command execution
pub type RunnerResult<T> = Result<T, RunnerError>;

/// Command execution errors
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The local process (e.g. `ssh`) could not be started
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The command ran and exited non-zero (or was killed by a signal)
    #[error("`{command}` failed{}{}", .status.map(|s| format!(" with exit status {s}")).unwrap_or_else(|| " (terminated by signal)".to_string()), stderr_suffix(.stderr))]
    Failed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

/// Captured output of a successful command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn new(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }
}

/// An external program invocation, optionally inside a working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Program and arguments, quoted for a POSIX shell
    pub fn command_line(&self) -> String {
        let mut line = shell_word(&self.program);
        for arg in &self.args {
            line.push(' ');
            line.push_str(&shell_word(arg));
        }
        line
    }

    /// Full shell line, including the `cd` into the working directory
    pub fn to_shell(&self) -> String {
        match &self.cwd {
            Some(dir) => format!("cd {} && {}", shell_path(dir), self.command_line()),
            None => self.command_line(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_shell())
    }
}

/// Run external programs on the target host
pub trait CommandRunner {
    /// Run a command to completion; non-zero exit is an error
    fn run(&self, command: &CommandSpec) -> RunnerResult<CommandOutput>;
}

/// Quote a string for safe use in a POSIX shell
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

/// Quote only when the word contains shell metacharacters
pub fn shell_word(s: &str) -> String {
    let plain = !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./:=@%+,".contains(c));
    if plain {
        s.to_string()
    } else {
        shell_quote(s)
    }
}

pub fn shell_path(path: &Path) -> String {
    shell_word(&path.to_string_lossy())
}
