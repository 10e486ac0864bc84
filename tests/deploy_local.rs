//! Full deploys against a local directory standing in for the target.

mod common;

use std::fs;
use std::path::{Path, PathBuf};

use common::{FakeRunner, LocalFs, EXAMPLE_ENV, GENERATED_KEY};
use cutover::domain::services::PlanSettings;
use cutover::domain::value_objects::{AclGrant, CutoverMode, EnvBackupMode};
use cutover::error::CutoverError;
use cutover::{DeployOptions, DeployResult, DeployUseCase, Planner, ReleaseLayout};
use tempfile::TempDir;

const ROOT: &str = "apps/shop";
const FIRST: &str = "20240101120000";
const SECOND: &str = "20240102120000";

fn settings() -> PlanSettings {
    PlanSettings {
        repository: "git@github.com:acme/shop.git".into(),
        branch: "main".into(),
        clone_depth: 1,
        env_values: vec![
            ("APP_NAME".into(), "Acme Shop".into()),
            ("APP_ENV".into(), "production".into()),
            ("APP_DEBUG".into(), "false".into()),
            ("APP_URL".into(), "https://shop.example.com".into()),
        ],
        acl: AclGrant::new("www-data"),
        php_fpm_service: "php8.1-fpm".into(),
        cutover: CutoverMode::Swap,
        env_backup: EnvBackupMode::default(),
    }
}

struct Target {
    dir: TempDir,
}

impl Target {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(ROOT).join(relative)
    }

    fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).unwrap()
    }

    fn link(&self, relative: &str) -> PathBuf {
        fs::read_link(self.path(relative)).unwrap()
    }

    fn is_link(&self, relative: &str) -> bool {
        fs::symlink_metadata(self.path(relative))
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false)
    }

    fn deploy_with(
        &self,
        release: &str,
        settings: PlanSettings,
        runner: FakeRunner,
    ) -> Result<DeployResult, CutoverError> {
        let layout = ReleaseLayout::new(ROOT, release.parse().unwrap());
        let plan = Planner::new(settings).plan(layout);
        let use_case = DeployUseCase::new(LocalFs::new(self.dir.path()), runner);
        use_case.execute(&plan, &DeployOptions::new("deploy@localhost:apps/shop"))
    }

    fn deploy(&self, release: &str) -> (DeployResult, FakeRunner) {
        let runner = FakeRunner::new(self.dir.path());
        let result = self
            .deploy_with(release, settings(), runner.clone())
            .unwrap();
        (result, runner)
    }
}

#[test]
fn first_deploy_builds_shared_state() {
    let target = Target::new();

    let (result, runner) = target.deploy(FIRST);

    let env = target.read(".env");
    assert!(env.contains("APP_NAME=\"Acme Shop\"\n"), "{env}");
    assert!(env.contains("APP_ENV=production\n"));
    assert!(env.contains("APP_DEBUG=false\n"));
    assert!(env.contains("APP_URL=https://shop.example.com\n"));
    assert!(env.contains("DB_HOST=127.0.0.1\n"));
    assert!(env.contains("MAIL_FROM_NAME=\"${APP_NAME}\"\n"));
    assert!(env.contains(GENERATED_KEY));

    assert!(target.path("storage/framework/cache").is_dir());
    assert!(target.path("storage/logs/.gitignore").is_file());
    assert_eq!(target.link(&format!("{FIRST}/storage")), Path::new("../storage"));
    assert_eq!(target.link(&format!("{FIRST}/.env")), Path::new("../.env"));
    assert_eq!(target.link("current"), Path::new(FIRST));
    assert_eq!(target.read(&format!("{FIRST}/.env.example")), EXAMPLE_ENV);

    assert!(result.storage_promoted);
    assert!(result.key_generated);
    assert!(result.env_backup.is_none());
    assert_eq!(runner.ran("setfacl -Rm g:www-data:rwx,d:g:www-data:rwx"), 2);
    assert_eq!(runner.ran("sudo systemctl reload php8.1-fpm"), 1);
}

#[test]
fn directory_is_created_before_clone() {
    let target = Target::new();
    assert!(!target.path("").exists());

    let (_, runner) = target.deploy(FIRST);

    assert!(target.path("").is_dir());
    assert!(runner.log()[0].starts_with("git clone"));
}

#[test]
fn second_deploy_renames_env_and_reuses_storage() {
    let target = Target::new();
    target.deploy(FIRST);

    // Operator edits shared state between deploys
    let mut env = target.read(".env");
    env.push_str("DB_PASSWORD=secret\n");
    fs::write(target.path(".env"), &env).unwrap();
    fs::write(target.path("storage/logs/laravel.log"), "kept\n").unwrap();

    let (result, runner) = target.deploy(SECOND);

    let backup = format!(".env-{SECOND}.bak");
    assert_eq!(target.read(&backup), env);
    assert_eq!(result.env_backup, Some(PathBuf::from(ROOT).join(&backup)));

    // The live file is a fresh copy of the example with the values applied
    let live = target.read(".env");
    assert!(!live.contains("DB_PASSWORD"), "{live}");
    assert!(live.contains("APP_NAME=\"Acme Shop\"\n"), "{live}");
    assert!(live.contains(GENERATED_KEY));
    assert!(result.key_generated);
    assert_eq!(runner.ran("key:generate"), 1);

    assert_eq!(target.read("storage/logs/laravel.log"), "kept\n");
    assert!(target.is_link(&format!("{SECOND}/storage")));
    assert_eq!(target.link("current"), Path::new(SECOND));
    assert!(target.path(FIRST).is_dir());
    assert!(!result.storage_promoted);
    assert_eq!(runner.ran("setfacl"), 1);
}

#[test]
fn every_deploy_reseeds_env_by_default() {
    let target = Target::new();
    target.deploy(FIRST);
    target.deploy(SECOND);

    let mut env = target.read(".env");
    env.push_str("OPERATOR=1\n");
    fs::write(target.path(".env"), &env).unwrap();

    const THIRD: &str = "20240103120000";
    target.deploy(THIRD);

    assert!(!target.read(".env").contains("OPERATOR=1"));
    assert!(target.read(&format!(".env-{THIRD}.bak")).contains("OPERATOR=1\n"));
    assert!(target.read(".env").starts_with("APP_NAME=\"Acme Shop\"\n"));
}

#[test]
fn copy_backup_keeps_live_env() {
    let target = Target::new();
    let mut settings = settings();
    settings.env_backup = EnvBackupMode::Copy;
    target
        .deploy_with(FIRST, settings.clone(), FakeRunner::new(target.dir.path()))
        .unwrap();

    let mut env = target.read(".env");
    env.push_str("DB_PASSWORD=secret\n");
    fs::write(target.path(".env"), &env).unwrap();

    let runner = FakeRunner::new(target.dir.path());
    let result = target.deploy_with(SECOND, settings, runner.clone()).unwrap();

    assert_eq!(target.read(&format!(".env-{SECOND}.bak")), env);
    assert_eq!(target.read(".env"), env);
    assert!(!result.key_generated);
    assert!(result.was_skipped("generate key"));
    assert_eq!(runner.ran("key:generate"), 0);
}

#[test]
fn atomic_cutover_leaves_no_temporary_link() {
    let target = Target::new();
    let mut settings = settings();
    settings.cutover = CutoverMode::Atomic;

    for release in [FIRST, SECOND] {
        let runner = FakeRunner::new(target.dir.path());
        target
            .deploy_with(release, settings.clone(), runner)
            .unwrap();
    }

    assert_eq!(target.link("current"), Path::new(SECOND));
    assert!(!target.is_link("current.tmp"));
}

#[test]
fn failed_command_stops_the_sequence() {
    let target = Target::new();
    let runner = FakeRunner::new(target.dir.path()).failing("composer");

    let err = target
        .deploy_with(FIRST, settings(), runner.clone())
        .unwrap_err();

    match err {
        CutoverError::StepFailed { number, step, .. } => {
            assert_eq!(number, 11);
            assert_eq!(step, "install dependencies");
        }
        other => panic!("unexpected error: {other}"),
    }
    // Steps before the failure stay applied
    assert_eq!(target.link("current"), Path::new(FIRST));
    assert_eq!(runner.ran("artisan"), 0);
    assert_eq!(runner.ran("systemctl"), 0);
}
