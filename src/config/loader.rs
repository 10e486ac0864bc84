//! Configuration loading
//!
//! Variables are resolved from the process environment layered over the
//! dotenv file; an existing process variable is never overridden by the
//! file. Tuning settings come from a TOML file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::{CutoverMode, EnvBackupMode};
use crate::error::ConfigError;

use super::env_file::parse_env_file;
use super::env_validator::{closest, EnvVarValidator};
use super::types::{AppSettings, DeployConfig, Settings, DEFAULT_BRANCH};

/// Dotenv file read when `--env-file` is not given
pub const DEFAULT_ENV_FILE: &str = "config/.env";
/// Settings file read when `--config` is not given
pub const DEFAULT_SETTINGS_FILE: &str = "cutover.toml";
/// Overrides the home directory used for the user settings file
pub const TEST_HOME_VAR: &str = "CUTOVER_TEST_HOME";

/// Settings that must be present and non-empty, in report order
pub const REQUIRED_KEYS: [&str; 8] = [
    "TARGET_SERVER",
    "TARGET_USER",
    "TARGET_DIR",
    "REPOSITORY",
    "APP_NAME",
    "APP_ENV",
    "APP_DEBUG",
    "APP_URL",
];

/// Resolved variables, process environment over dotenv
pub type EnvVars = BTreeMap<String, String>;

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Where to look for configuration; `None` means the defaults
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub env_file: Option<PathBuf>,
    pub settings_file: Option<PathBuf>,
    /// Takes precedence over `BRANCH`
    pub branch: Option<String>,
}

/// A loaded configuration plus whatever deserves a warning
#[derive(Debug, Clone)]
pub struct Loaded {
    pub config: DeployConfig,
    pub warnings: Vec<ConfigWarning>,
    /// Settings file actually read, if any
    pub settings_file: Option<PathBuf>,
}

/// Load everything a deploy needs from the process environment and files
pub fn load(options: &LoadOptions) -> Result<Loaded, ConfigError> {
    let vars = load_env(options.env_file.as_deref(), std::env::vars())?;
    let (settings, warnings, settings_file) = load_settings(options.settings_file.as_deref())?;
    let settings = with_env_overrides(settings, &vars);
    let config = resolve(&vars, settings, options.branch.as_deref())?;

    Ok(Loaded {
        config,
        warnings,
        settings_file,
    })
}

/// Merge the dotenv file under `process` variables
///
/// An explicitly named file must exist; the default one may be absent.
pub fn load_env<I>(env_file: Option<&Path>, process: I) -> Result<EnvVars, ConfigError>
where
    I: IntoIterator<Item = (String, String)>,
{
    let (path, required) = match env_file {
        Some(path) => (path, true),
        None => (Path::new(DEFAULT_ENV_FILE), false),
    };

    let mut vars = EnvVars::new();
    match fs::read_to_string(path) {
        Ok(content) => {
            tracing::debug!(file = %path.display(), "reading dotenv file");
            vars.extend(parse_env_file(&content, path)?);
        }
        Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(file = %path.display(), "no dotenv file");
        }
        Err(source) => {
            return Err(ConfigError::Io {
                file: path.to_path_buf(),
                source,
            })
        }
    }

    vars.extend(process);
    Ok(vars)
}

/// Build the deploy configuration, reporting every missing key at once
pub fn resolve(
    vars: &EnvVars,
    settings: Settings,
    branch: Option<&str>,
) -> Result<DeployConfig, ConfigError> {
    let value = |key: &str| {
        vars.get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    let missing: Vec<String> = REQUIRED_KEYS
        .into_iter()
        .filter(|&key| value(key).is_none())
        .map(String::from)
        .collect();
    if !missing.is_empty() {
        return Err(ConfigError::MissingKeys(missing));
    }
    if let Some(key) = REQUIRED_KEYS
        .into_iter()
        .find(|&key| value(key).is_some_and(|v| v.chars().any(char::is_control)))
    {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "contains a line break or other control character".into(),
        });
    }
    let required = |key: &str| value(key).unwrap_or_default();

    let branch = branch
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(str::to_string)
        .or_else(|| value("BRANCH"))
        .unwrap_or_else(|| DEFAULT_BRANCH.to_string());

    Ok(DeployConfig {
        server: required("TARGET_SERVER"),
        user: required("TARGET_USER"),
        directory: normalize_directory(&required("TARGET_DIR")),
        repository: required("REPOSITORY"),
        branch,
        app: AppSettings {
            name: required("APP_NAME"),
            env: required("APP_ENV"),
            debug: required("APP_DEBUG"),
            url: required("APP_URL"),
        },
        settings,
    })
}

/// Commands run in the remote user's home, where `~` is implied and
/// quoting would stop the shell from expanding it.
fn normalize_directory(dir: &str) -> PathBuf {
    let dir = match dir {
        "~" => ".",
        _ => dir.strip_prefix("~/").unwrap_or(dir),
    };
    let trimmed = dir.trim_end_matches('/');
    if trimmed.is_empty() {
        PathBuf::from(dir)
    } else {
        PathBuf::from(trimmed)
    }
}

/// Load the settings file: explicit path, `./cutover.toml`, user config,
/// or built-in defaults, in that order
pub fn load_settings(
    explicit: Option<&Path>,
) -> Result<(Settings, Vec<ConfigWarning>, Option<PathBuf>), ConfigError> {
    if let Some(path) = explicit {
        let (settings, warnings) = load_with_warnings(path)?;
        return Ok((settings, warnings, Some(path.to_path_buf())));
    }

    let candidates = [
        Some(PathBuf::from(DEFAULT_SETTINGS_FILE)),
        user_settings_path(),
    ];
    for path in candidates.into_iter().flatten() {
        if path.is_file() {
            let (settings, warnings) = load_with_warnings(&path)?;
            return Ok((settings, warnings, Some(path)));
        }
    }

    Ok((Settings::default(), Vec::new(), None))
}

/// `~/.config/cutover/config.toml`, honouring `XDG_CONFIG_HOME`
pub fn user_settings_path() -> Option<PathBuf> {
    let config_dir = std::env::var(TEST_HOME_VAR)
        .ok()
        .map(|home| PathBuf::from(home).join(".config"))
        .or_else(|| std::env::var("XDG_CONFIG_HOME").ok().map(PathBuf::from))
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))?;
    Some(config_dir.join("cutover/config.toml"))
}

/// Parse a settings file and collect non-fatal warnings (unknown keys).
pub fn load_with_warnings(path: &Path) -> Result<(Settings, Vec<ConfigWarning>), ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        file: path.to_path_buf(),
        source,
    })?;
    parse_settings(&content, path)
}

pub(crate) fn parse_settings(
    content: &str,
    path: &Path,
) -> Result<(Settings, Vec<ConfigWarning>), ConfigError> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let settings: Settings = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ConfigError::InvalidSettings {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
                key,
                file: path.to_path_buf(),
            }
        })
        .collect();

    Ok((settings, warnings))
}

/// Apply `CUTOVER_*` overrides from the resolved variables
pub fn with_env_overrides(settings: Settings, vars: &EnvVars) -> Settings {
    with_env_overrides_to(settings, vars, &mut std::io::stderr())
}

pub(crate) fn with_env_overrides_to<W: std::io::Write>(
    mut settings: Settings,
    vars: &EnvVars,
    writer: &mut W,
) -> Settings {
    if let Some(mode) = vars.get("CUTOVER_CUTOVER_MODE") {
        settings.deploy.cutover = EnvVarValidator::new("CUTOVER_CUTOVER_MODE", CutoverMode::VALUES)
            .parse_with_writer(mode, CutoverMode::parse, settings.deploy.cutover, writer);
    }

    if let Some(mode) = vars.get("CUTOVER_ENV_BACKUP") {
        settings.deploy.env_backup =
            EnvVarValidator::new("CUTOVER_ENV_BACKUP", EnvBackupMode::VALUES).parse_with_writer(
                mode,
                EnvBackupMode::parse,
                settings.deploy.env_backup,
                writer,
            );
    }

    settings
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.trim_start().starts_with(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "deploy",
        "acl_group",
        "php_fpm_service",
        "clone_depth",
        "cutover",
        "env_backup",
        "symlink",
        "ssh",
        "port",
        "identity_file",
        "multiplex",
    ];

    closest(unknown, CANDIDATES).map(|(candidate, _)| candidate.to_string())
}
