//! Deploy planning
//!
//! Turns the deploy settings and a fresh release layout into the ordered
//! list of typed steps. Nothing here executes; see `DeployUseCase` for that
//! and `render_script` for the shell rendering.

use std::path::PathBuf;

use crate::domain::ports::CommandSpec;
use crate::domain::value_objects::{AclGrant, CutoverMode, EnvBackupMode, ReleaseLayout};

use super::shared_store::SharedSlot;

/// Flags shared by every artisan invocation
const ARTISAN_FLAGS: [&str; 3] = ["-q", "--no-ansi", "--no-interaction"];

/// Everything the planner needs to know about one deploy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanSettings {
    pub repository: String,
    pub branch: String,
    pub clone_depth: u32,
    /// `.env` keys rewritten on every deploy, in order
    pub env_values: Vec<(String, String)>,
    pub acl: AclGrant,
    pub php_fpm_service: String,
    pub cutover: CutoverMode,
    pub env_backup: EnvBackupMode,
}

/// One operation of the deploy sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Create the target directory unless it exists
    EnsureDirectory { path: PathBuf },
    /// Shallow clone into the release directory; never skipped
    CloneRelease { command: CommandSpec },
    /// Archive the shared `.env` if there is one
    BackupEnv {
        backup: PathBuf,
        mode: EnvBackupMode,
    },
    /// Copy `.env.example` to the shared `.env` if it is missing
    SeedEnv { example: PathBuf },
    /// Rewrite the app values in the shared `.env`
    RewriteEnv { values: Vec<(String, String)> },
    /// Symlink a shared slot into the release
    LinkShared {
        slot: SharedSlot,
        release_dir: PathBuf,
    },
    /// Promote the release's storage on first deploy, drop it otherwise
    ShareStorage {
        release_storage: PathBuf,
        acl: AclGrant,
    },
    /// Apply the ACL grant unconditionally
    GrantAcl { path: PathBuf, acl: AclGrant },
    /// Repoint the live symlink at the release
    Cutover {
        link: PathBuf,
        target: PathBuf,
        mode: CutoverMode,
    },
    /// Run an external command
    Exec {
        name: String,
        description: String,
        command: CommandSpec,
    },
    /// Run the key generator unless `.env` already holds a key
    GenerateKey { command: CommandSpec },
}

impl Step {
    /// Short, stable name used in logs and events
    pub fn name(&self) -> String {
        match self {
            Step::EnsureDirectory { .. } => "ensure directory".into(),
            Step::CloneRelease { .. } => "clone release".into(),
            Step::BackupEnv { .. } => "back up .env".into(),
            Step::SeedEnv { .. } => "seed .env".into(),
            Step::RewriteEnv { .. } => "rewrite .env".into(),
            Step::LinkShared { slot, .. } => format!("link {}", slot.name()),
            Step::ShareStorage { .. } => "share storage".into(),
            Step::GrantAcl { .. } => "fix cache permissions".into(),
            Step::Cutover { .. } => "cutover".into(),
            Step::Exec { name, .. } => name.clone(),
            Step::GenerateKey { .. } => "generate key".into(),
        }
    }

    /// One-line description for the operator
    pub fn description(&self, layout: &ReleaseLayout) -> String {
        let root = layout.root().display();
        match self {
            Step::EnsureDirectory { path } => format!("Check {}/", path.display()),
            Step::CloneRelease { .. } => format!(
                "Clone release {} into {}/",
                layout.release(),
                layout.release_dir().display()
            ),
            Step::BackupEnv { backup, .. } => {
                format!("Back up existing {root}/.env to {}", backup.display())
            }
            Step::SeedEnv { example } => {
                format!("Prepare {root}/.env from {}", example.display())
            }
            Step::RewriteEnv { .. } => format!("Update {root}/.env"),
            Step::LinkShared { slot, release_dir } => format!(
                "Symlink {}/{} to {root}/{}",
                release_dir.display(),
                slot.name(),
                slot.name()
            ),
            Step::ShareStorage { .. } => {
                format!("Check {root}/storage/ and fix permissions if necessary")
            }
            Step::GrantAcl { path, .. } => format!("Fix permissions to {}", path.display()),
            Step::Cutover { link, target, .. } => {
                format!("Point {} at {}", link.display(), target.display())
            }
            Step::Exec { description, .. } => description.clone(),
            Step::GenerateKey { .. } => "Generate application key if missing".into(),
        }
    }
}

/// The full, ordered deploy sequence for one release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployPlan {
    layout: ReleaseLayout,
    steps: Vec<Step>,
}

impl DeployPlan {
    pub fn layout(&self) -> &ReleaseLayout {
        &self.layout
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

pub struct Planner {
    settings: PlanSettings,
}

impl Planner {
    pub fn new(settings: PlanSettings) -> Self {
        Self { settings }
    }

    pub fn plan(&self, layout: ReleaseLayout) -> DeployPlan {
        let s = &self.settings;
        let release_dir = layout.release_dir();
        let current = layout.current();

        let mut steps = vec![
            Step::EnsureDirectory {
                path: layout.root().to_path_buf(),
            },
            Step::CloneRelease {
                command: CommandSpec::new("git")
                    .arg("clone")
                    .arg(&s.repository)
                    .arg(format!("--branch={}", s.branch))
                    .arg(format!("--depth={}", s.clone_depth))
                    .arg("-q")
                    .arg(release_dir.to_string_lossy()),
            },
            Step::BackupEnv {
                backup: layout.env_backup(),
                mode: s.env_backup,
            },
            Step::SeedEnv {
                example: layout.env_example(),
            },
            Step::RewriteEnv {
                values: s.env_values.clone(),
            },
            Step::LinkShared {
                slot: SharedSlot::Env,
                release_dir: release_dir.clone(),
            },
            Step::ShareStorage {
                release_storage: layout.release_storage(),
                acl: s.acl.clone(),
            },
            Step::GrantAcl {
                path: layout.cache_dir(),
                acl: s.acl.clone(),
            },
            Step::LinkShared {
                slot: SharedSlot::Storage,
                release_dir: release_dir.clone(),
            },
            Step::Cutover {
                link: current.clone(),
                target: PathBuf::from(layout.release().as_str()),
                mode: s.cutover,
            },
            Step::Exec {
                name: "install dependencies".into(),
                description: "Install composer dependencies".into(),
                command: CommandSpec::new("composer")
                    .args([
                        "install",
                        "-q",
                        "--no-dev",
                        "--optimize-autoloader",
                        "--no-ansi",
                        "--no-interaction",
                        "--no-progress",
                        "--prefer-dist",
                    ])
                    .current_dir(&current),
            },
            Step::GenerateKey {
                command: artisan("key:generate").current_dir(&current),
            },
        ];

        // Cache commands target the release directory itself, after cutover.
        for (name, command, description) in [
            ("clear caches", "optimize:clear", "Optimize"),
            ("cache config", "config:cache", "Cache config"),
            ("cache routes", "route:cache", "Cache routes"),
            ("cache views", "view:cache", "Cache views"),
        ] {
            steps.push(Step::Exec {
                name: name.into(),
                description: description.into(),
                command: artisan(command).current_dir(&release_dir),
            });
        }

        steps.push(Step::Exec {
            name: "reload php-fpm".into(),
            description: format!("Reload {}", s.php_fpm_service),
            command: CommandSpec::new("sudo").args([
                "systemctl",
                "reload",
                s.php_fpm_service.as_str(),
            ]),
        });

        DeployPlan { layout, steps }
    }
}

fn artisan(command: &str) -> CommandSpec {
    CommandSpec::new("php")
        .arg("artisan")
        .arg(command)
        .args(ARTISAN_FLAGS)
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn settings() -> PlanSettings {
        PlanSettings {
            repository: "git@github.com:acme/shop.git".into(),
            branch: "main".into(),
            clone_depth: 1,
            env_values: vec![
                ("APP_NAME".into(), "Shop".into()),
                ("APP_ENV".into(), "production".into()),
                ("APP_DEBUG".into(), "false".into()),
                ("APP_URL".into(), "https://shop.example.com".into()),
            ],
            acl: AclGrant::default(),
            php_fpm_service: "php8.1-fpm".into(),
            cutover: CutoverMode::Swap,
            env_backup: EnvBackupMode::default(),
        }
    }

    fn plan() -> DeployPlan {
        let layout = ReleaseLayout::new("apps/shop", "20240102030405".parse().unwrap());
        Planner::new(settings()).plan(layout)
    }

    #[test]
    fn steps_follow_release_order() {
        let names: Vec<String> = plan().steps().iter().map(Step::name).collect();
        assert_eq!(
            names,
            vec![
                "ensure directory",
                "clone release",
                "back up .env",
                "seed .env",
                "rewrite .env",
                "link .env",
                "share storage",
                "fix cache permissions",
                "link storage",
                "cutover",
                "install dependencies",
                "generate key",
                "clear caches",
                "cache config",
                "cache routes",
                "cache views",
                "reload php-fpm",
            ]
        );
    }

    #[test]
    fn directory_is_ensured_before_clone() {
        let plan = plan();
        assert!(matches!(plan.steps()[0], Step::EnsureDirectory { .. }));
        assert!(matches!(plan.steps()[1], Step::CloneRelease { .. }));
    }

    #[test]
    fn clone_is_shallow_and_quiet() {
        let plan = plan();
        let Step::CloneRelease { command } = &plan.steps()[1] else {
            panic!("expected clone step");
        };
        assert_eq!(
            command.to_shell(),
            "git clone git@github.com:acme/shop.git --branch=main --depth=1 -q apps/shop/20240102030405"
        );
    }

    #[test]
    fn composer_and_key_run_in_current_cache_commands_in_release() {
        let plan = plan();
        let cwd_of = |name: &str| {
            plan.steps()
                .iter()
                .find_map(|step| match step {
                    Step::Exec { name: n, command, .. } if n == name => command.cwd.clone(),
                    Step::GenerateKey { command } if name == "generate key" => command.cwd.clone(),
                    _ => None,
                })
                .unwrap()
        };

        assert_eq!(cwd_of("install dependencies"), PathBuf::from("apps/shop/current"));
        assert_eq!(cwd_of("generate key"), PathBuf::from("apps/shop/current"));
        for name in ["clear caches", "cache config", "cache routes", "cache views"] {
            assert_eq!(cwd_of(name), PathBuf::from("apps/shop/20240102030405"));
        }
    }

    #[test]
    fn cutover_targets_release_by_relative_name() {
        let plan = plan();
        let cutover = plan
            .steps()
            .iter()
            .find(|s| matches!(s, Step::Cutover { .. }))
            .unwrap();
        assert_eq!(
            cutover,
            &Step::Cutover {
                link: PathBuf::from("apps/shop/current"),
                target: PathBuf::from("20240102030405"),
                mode: CutoverMode::Swap,
            }
        );
    }

    #[test]
    fn reload_uses_configured_service() {
        let mut s = settings();
        s.php_fpm_service = "php8.3-fpm".into();
        let layout = ReleaseLayout::new("apps/shop", "20240102030405".parse().unwrap());
        let plan = Planner::new(s).plan(layout);
        let Some(Step::Exec { command, .. }) = plan.steps().last() else {
            panic!("expected exec step");
        };
        assert_eq!(command.to_shell(), "sudo systemctl reload php8.3-fpm");
    }

    #[test]
    fn descriptions_mention_paths() {
        let plan = plan();
        let layout = plan.layout();
        assert_eq!(plan.steps()[0].description(layout), "Check apps/shop/");
        assert_eq!(
            plan.steps()[2].description(layout),
            "Back up existing apps/shop/.env to apps/shop/.env-20240102030405.bak"
        );
    }
}
