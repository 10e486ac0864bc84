//! Deploy Use Case
//!
//! Runs a `DeployPlan` step by step against the target:
//! 1. Announce the release
//! 2. For each step, check whether it is already satisfied, act otherwise
//! 3. Stop at the first failing step, leaving the target as it is
//!
//! Nothing is retried and nothing is rolled back; a failed deploy needs an
//! operator to inspect the target before running again.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::ports::{
    CommandRunner, CommandSpec, DeployEvent, DeployEventSink, NoopEventSink, TargetFs,
};
use crate::domain::services::{
    has_app_key, rewrite_env, DeployPlan, SharedSlot, SharedStore, Step,
};
use crate::domain::value_objects::{CutoverMode, ReleaseLayout};
use crate::error::{CutoverError, CutoverResult, StepError};

use super::options::DeployOptions;
use super::result::DeployResult;

enum Outcome {
    Done,
    Skipped(String),
}

/// Deploy use case - executes the release sequence
///
/// Parameterized by its ports so the same sequence runs over SSH or
/// against test doubles.
pub struct DeployUseCase<FS, CR>
where
    FS: TargetFs,
    CR: CommandRunner,
{
    fs: FS,
    runner: CR,
}

impl<FS, CR> DeployUseCase<FS, CR>
where
    FS: TargetFs,
    CR: CommandRunner,
{
    pub fn new(fs: FS, runner: CR) -> Self {
        Self { fs, runner }
    }

    pub fn execute(&self, plan: &DeployPlan, options: &DeployOptions) -> CutoverResult<DeployResult> {
        self.execute_with_events(plan, options, Arc::new(NoopEventSink))
    }

    /// Execute the plan, reporting progress to `sink`
    pub fn execute_with_events(
        &self,
        plan: &DeployPlan,
        options: &DeployOptions,
        sink: Arc<dyn DeployEventSink>,
    ) -> CutoverResult<DeployResult> {
        let layout = plan.layout();
        let release = layout.release().clone();
        let mut result = DeployResult::new(release.clone());

        info!(release = %release, destination = %options.destination, "starting deploy");
        sink.on_event(DeployEvent::Started {
            release: release.to_string(),
            destination: options.destination.clone(),
            step_count: plan.len(),
        });

        let mut last_completed: Option<String> = None;
        for (index, step) in plan.steps().iter().enumerate() {
            let number = index + 1;
            let name = step.name();

            if options.is_cancelled() {
                warn!(step = %name, "deploy interrupted before step");
                return Err(CutoverError::Aborted {
                    after: last_completed,
                });
            }

            info!(number, step = %name, release = %release, "running step");
            sink.on_event(DeployEvent::StepStarted {
                number,
                name: name.clone(),
                description: step.description(layout),
            });

            match self.run_step(step, layout, number, &sink, &mut result) {
                Ok(Outcome::Done) => {
                    result.executed.push(name.clone());
                    sink.on_event(DeployEvent::StepCompleted { number });
                }
                Ok(Outcome::Skipped(reason)) => {
                    debug!(step = %name, %reason, "step already satisfied");
                    sink.on_event(DeployEvent::StepSkipped {
                        number,
                        reason: reason.clone(),
                    });
                    result.skipped.push((name.clone(), reason));
                }
                Err(source) => {
                    warn!(number, step = %name, error = %source, "step failed");
                    sink.on_event(DeployEvent::StepFailed {
                        number,
                        error: source.to_string(),
                    });
                    return Err(CutoverError::StepFailed {
                        number,
                        step: name,
                        source,
                    });
                }
            }
            last_completed = Some(name);
        }

        info!(
            release = %release,
            executed = result.executed.len(),
            skipped = result.skipped.len(),
            "deploy complete"
        );
        sink.on_event(DeployEvent::Completed {
            release: release.to_string(),
            executed_count: result.executed.len(),
            skipped_count: result.skipped.len(),
        });

        Ok(result)
    }

    fn run_step(
        &self,
        step: &Step,
        layout: &ReleaseLayout,
        number: usize,
        sink: &Arc<dyn DeployEventSink>,
        result: &mut DeployResult,
    ) -> Result<Outcome, StepError> {
        let store = SharedStore::new(&self.fs, layout.root());

        match step {
            Step::EnsureDirectory { path } => {
                if self.fs.is_dir(path)? {
                    return Ok(Outcome::Skipped(format!("{} exists", path.display())));
                }
                self.fs.create_dir_all(path)?;
            }

            Step::CloneRelease { command } => {
                self.exec(command, number, sink)?;
            }

            Step::BackupEnv { backup, mode } => {
                if !store.archive_env(backup, *mode)? {
                    return Ok(Outcome::Skipped("no shared .env yet".into()));
                }
                result.env_backup = Some(backup.clone());
            }

            Step::SeedEnv { example } => {
                if store.exists(SharedSlot::Env)? {
                    return Ok(Outcome::Skipped("shared .env present".into()));
                }
                store.promote(SharedSlot::Env, example)?;
            }

            Step::RewriteEnv { values } => {
                let before = store.read_env()?;
                let rewrite = rewrite_env(&before, values);
                if !rewrite.missing.is_empty() {
                    warn!(keys = ?rewrite.missing, "keys not present in .env, left unset");
                    sink.on_event(DeployEvent::EnvKeysMissing {
                        path: store.path(SharedSlot::Env),
                        keys: rewrite.missing.clone(),
                    });
                }
                if !rewrite.changed(&before) {
                    return Ok(Outcome::Skipped("values already current".into()));
                }
                store.write_env(&rewrite.content)?;
                if sink.wants_detailed_events() {
                    sink.on_event(DeployEvent::EnvRewritten {
                        path: store.path(SharedSlot::Env),
                        before,
                        after: rewrite.content,
                    });
                }
            }

            Step::LinkShared { slot, release_dir } => {
                store.link(*slot, release_dir)?;
            }

            Step::ShareStorage {
                release_storage,
                acl,
            } => {
                if store.exists(SharedSlot::Storage)? {
                    self.fs.remove_dir_all(release_storage)?;
                    return Ok(Outcome::Skipped(
                        "shared storage reused, release copy removed".into(),
                    ));
                }
                store.promote(SharedSlot::Storage, release_storage)?;
                self.exec(&acl.command(&store.path(SharedSlot::Storage)), number, sink)?;
                result.storage_promoted = true;
            }

            Step::GrantAcl { path, acl } => {
                self.exec(&acl.command(path), number, sink)?;
            }

            Step::Cutover { link, target, mode } => {
                self.cutover(link, target, *mode)?;
            }

            Step::Exec { command, .. } => {
                self.exec(command, number, sink)?;
            }

            Step::GenerateKey { command } => {
                if has_app_key(&store.read_env()?) {
                    return Ok(Outcome::Skipped("APP_KEY already set".into()));
                }
                self.exec(command, number, sink)?;
                result.key_generated = true;
            }
        }
        Ok(Outcome::Done)
    }

    fn cutover(&self, link: &Path, target: &Path, mode: CutoverMode) -> Result<(), StepError> {
        match mode {
            CutoverMode::Swap => {
                if self.fs.is_symlink(link)? {
                    self.fs.remove_link(link)?;
                }
                self.fs.symlink(target, link)?;
            }
            CutoverMode::Atomic => self.fs.replace_symlink(target, link)?,
        }
        Ok(())
    }

    fn exec(
        &self,
        command: &CommandSpec,
        number: usize,
        sink: &Arc<dyn DeployEventSink>,
    ) -> Result<(), StepError> {
        let output = self.runner.run(command)?;
        let stdout = output.stdout.trim_end();
        if !stdout.is_empty() {
            sink.on_event(DeployEvent::StepOutput {
                number,
                output: stdout.to_string(),
            });
        }
        Ok(())
    }
}
