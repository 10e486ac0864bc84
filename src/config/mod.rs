//! Configuration module for Cutover
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Process environment (required keys, `CUTOVER_*` overrides)
//! 3. Dotenv file (`config/.env` unless `--env-file`)
//! 4. Settings file (`cutover.toml`, then `~/.config/cutover/config.toml`)
//! 5. Built-in defaults (lowest priority)

mod env_file;
mod env_validator;
mod loader;
mod types;

pub use env_file::parse_env_file;
pub use env_validator::{levenshtein, EnvVarValidator};
pub use loader::{
    load, load_env, load_settings, load_with_warnings, resolve, user_settings_path,
    with_env_overrides, ConfigWarning, EnvVars, LoadOptions, Loaded, DEFAULT_ENV_FILE,
    DEFAULT_SETTINGS_FILE, REQUIRED_KEYS, TEST_HOME_VAR,
};
pub use types::{AppSettings, DeployConfig, DeploySettings, Settings, SshSettings, DEFAULT_BRANCH};
