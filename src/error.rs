//! Error types for Cutover
//!
//! Library code returns `CutoverResult`; the binary wraps these in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::{FsError, RunnerError};

/// Result type alias for Cutover operations
pub type CutoverResult<T> = Result<T, CutoverError>;

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// One or more required settings are absent or empty
    #[error("missing or empty required settings: {}", .0.join(", "))]
    MissingKeys(Vec<String>),

    /// Malformed line in a dotenv file
    #[error("invalid line {line} in {file}: {message}")]
    EnvFile {
        file: PathBuf,
        line: usize,
        message: String,
    },

    /// A setting holds a value that cannot be written to a dotenv line
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// Invalid TOML settings file
    #[error("invalid settings in {file}: {message}")]
    InvalidSettings { file: PathBuf, message: String },

    /// IO error while reading a config source
    #[error("failed to read {file}: {source}")]
    Io {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Keys reported by a `MissingKeys` error (empty otherwise)
    pub fn missing_keys(&self) -> &[String] {
        match self {
            ConfigError::MissingKeys(keys) => keys,
            _ => &[],
        }
    }
}

/// Failure of a single deploy step's underlying operation
#[derive(Error, Debug)]
pub enum StepError {
    #[error(transparent)]
    Fs(#[from] FsError),

    #[error(transparent)]
    Runner(#[from] RunnerError),
}

/// Main error type for Cutover operations
#[derive(Error, Debug)]
pub enum CutoverError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A step of the deploy sequence failed; later steps were not run
    #[error("step {number} ({step}) failed: {source}")]
    StepFailed {
        number: usize,
        step: String,
        #[source]
        source: StepError,
    },

    /// The operator declined or interrupted the deploy
    #[error("deploy aborted by operator{}", .after.as_ref().map(|s| format!(" after '{s}'")).unwrap_or_default())]
    Aborted { after: Option<String> },

    /// Release identifier was not a `YYYYMMDDHHMMSS` token
    #[error("invalid release identifier '{0}'")]
    InvalidRelease(String),
}
