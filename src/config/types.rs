//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::services::PlanSettings;
use crate::domain::value_objects::{
    AclGrant, CutoverMode, EnvBackupMode, ReleaseId, ReleaseLayout, DEFAULT_SYMLINK,
};

/// Branch deployed when `BRANCH` is unset
pub const DEFAULT_BRANCH: &str = "main";

/// Deploy tuning (`[deploy]` table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploySettings {
    /// Group granted rwx (and default rwx) on storage and cache
    #[serde(default = "default_acl_group")]
    pub acl_group: String,

    /// systemd unit reloaded at the end of a deploy
    #[serde(default = "default_php_fpm_service")]
    pub php_fpm_service: String,

    #[serde(default = "default_clone_depth")]
    pub clone_depth: u32,

    #[serde(default)]
    pub cutover: CutoverMode,

    #[serde(default)]
    pub env_backup: EnvBackupMode,

    /// Name of the live symlink under the target directory
    #[serde(default = "default_symlink")]
    pub symlink: String,
}

impl Default for DeploySettings {
    fn default() -> Self {
        Self {
            acl_group: default_acl_group(),
            php_fpm_service: default_php_fpm_service(),
            clone_depth: default_clone_depth(),
            cutover: CutoverMode::default(),
            env_backup: EnvBackupMode::default(),
            symlink: default_symlink(),
        }
    }
}

fn default_acl_group() -> String {
    "www-data".to_string()
}

fn default_php_fpm_service() -> String {
    "php8.1-fpm".to_string()
}

fn default_clone_depth() -> u32 {
    1
}

fn default_symlink() -> String {
    DEFAULT_SYMLINK.to_string()
}

/// SSH connection tuning (`[ssh]` table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshSettings {
    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default)]
    pub identity_file: Option<PathBuf>,

    /// Reuse one connection for the whole run (ControlMaster)
    #[serde(default = "default_true")]
    pub multiplex: bool,
}

impl Default for SshSettings {
    fn default() -> Self {
        Self {
            port: None,
            identity_file: None,
            multiplex: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Contents of a `cutover.toml` settings file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub deploy: DeploySettings,

    #[serde(default)]
    pub ssh: SshSettings,
}

/// Values written into the shared `.env` on every deploy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub name: String,
    pub env: String,
    pub debug: String,
    pub url: String,
}

impl AppSettings {
    /// `(KEY, value)` pairs in the order they are rewritten
    pub fn env_values(&self) -> Vec<(String, String)> {
        vec![
            ("APP_NAME".to_string(), self.name.clone()),
            ("APP_ENV".to_string(), self.env.clone()),
            ("APP_DEBUG".to_string(), self.debug.clone()),
            ("APP_URL".to_string(), self.url.clone()),
        ]
    }
}

/// Fully resolved configuration for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployConfig {
    pub server: String,
    pub user: String,
    /// Target directory, relative to the remote user's home unless absolute
    pub directory: PathBuf,
    pub repository: String,
    pub branch: String,
    pub app: AppSettings,
    pub settings: Settings,
}

impl DeployConfig {
    /// `user@host`, as handed to ssh
    pub fn ssh_destination(&self) -> String {
        format!("{}@{}", self.user, self.server)
    }

    /// `user@host:dir`, for display
    pub fn destination(&self) -> String {
        format!("{}:{}", self.ssh_destination(), self.directory.display())
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn layout(&self, release: ReleaseId) -> ReleaseLayout {
        ReleaseLayout::new(&self.directory, release).with_symlink(&self.settings.deploy.symlink)
    }

    pub fn plan_settings(&self) -> PlanSettings {
        let deploy = &self.settings.deploy;
        PlanSettings {
            repository: self.repository.clone(),
            branch: self.branch.clone(),
            clone_depth: deploy.clone_depth,
            env_values: self.app.env_values(),
            acl: AclGrant::new(&deploy.acl_group),
            php_fpm_service: deploy.php_fpm_service.clone(),
            cutover: deploy.cutover,
            env_backup: deploy.env_backup,
        }
    }
}
