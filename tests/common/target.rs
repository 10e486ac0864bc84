//! A temp directory standing in for the deploy target host.
//!
//! `LocalFs` maps target paths under a base directory with `std::fs`;
//! `FakeRunner` records commands and imitates the few whose effects the
//! deploy depends on (the clone and key generation).

use std::cell::RefCell;
use std::fs;
use std::os::unix::fs::symlink;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use cutover::domain::ports::{
    CommandOutput, CommandRunner, CommandSpec, FsError, FsResult, RunnerError, RunnerResult,
    TargetFs,
};
use cutover::domain::services::tmp_link;

/// `.env.example` shipped in the cloned repository
pub const EXAMPLE_ENV: &str = "\
APP_NAME=Laravel
APP_ENV=local
APP_KEY=
APP_DEBUG=true
APP_URL=http://localhost

DB_HOST=127.0.0.1
MAIL_FROM_NAME=\"${APP_NAME}\"
";

pub const GENERATED_KEY: &str = "APP_KEY=base64:c2hvcC10ZXN0LWtleQ==";

pub struct LocalFs {
    base: PathBuf,
}

impl LocalFs {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    fn at(&self, path: &Path) -> PathBuf {
        self.base.join(path)
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> FsError + '_ {
    move |e| FsError::from_io(e, path)
}

impl TargetFs for LocalFs {
    fn is_file(&self, path: &Path) -> FsResult<bool> {
        Ok(self.at(path).is_file())
    }

    fn is_dir(&self, path: &Path) -> FsResult<bool> {
        Ok(self.at(path).is_dir())
    }

    fn is_symlink(&self, path: &Path) -> FsResult<bool> {
        Ok(fs::symlink_metadata(self.at(path))
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false))
    }

    fn read(&self, path: &Path) -> FsResult<String> {
        fs::read_to_string(self.at(path)).map_err(io_err(path))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        let full = self.at(path);
        let tmp = full.with_extension("tmp");
        fs::write(&tmp, content).map_err(io_err(path))?;
        fs::rename(&tmp, &full).map_err(io_err(path))
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        fs::create_dir_all(self.at(path)).map_err(io_err(path))
    }

    fn copy(&self, from: &Path, to: &Path) -> FsResult<()> {
        fs::copy(self.at(from), self.at(to))
            .map(|_| ())
            .map_err(io_err(from))
    }

    fn rename(&self, from: &Path, to: &Path) -> FsResult<()> {
        fs::rename(self.at(from), self.at(to)).map_err(io_err(from))
    }

    fn remove_dir_all(&self, path: &Path) -> FsResult<()> {
        fs::remove_dir_all(self.at(path)).map_err(io_err(path))
    }

    fn remove_link(&self, path: &Path) -> FsResult<()> {
        fs::remove_file(self.at(path)).map_err(io_err(path))
    }

    fn symlink(&self, target: &Path, link: &Path) -> FsResult<()> {
        symlink(target, self.at(link)).map_err(io_err(link))
    }

    fn replace_symlink(&self, target: &Path, link: &Path) -> FsResult<()> {
        let tmp = tmp_link(link);
        symlink(target, self.at(&tmp)).map_err(io_err(&tmp))?;
        fs::rename(self.at(&tmp), self.at(link)).map_err(io_err(link))
    }
}

/// Records every command; clones lay out a small Laravel tree
#[derive(Clone, Default)]
pub struct FakeRunner {
    base: PathBuf,
    log: Rc<RefCell<Vec<String>>>,
    fail_program: Option<String>,
}

impl FakeRunner {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            ..Self::default()
        }
    }

    /// Make every invocation of `program` exit 1
    pub fn failing(mut self, program: &str) -> Self {
        self.fail_program = Some(program.to_string());
        self
    }

    pub fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    pub fn ran(&self, needle: &str) -> usize {
        self.log.borrow().iter().filter(|c| c.contains(needle)).count()
    }

    fn clone_release(&self, dir: &Path) -> std::io::Result<()> {
        let release = self.base.join(dir);
        fs::create_dir_all(release.join("storage/framework/cache"))?;
        fs::create_dir_all(release.join("storage/logs"))?;
        fs::create_dir_all(release.join("bootstrap/cache"))?;
        fs::write(release.join("storage/logs/.gitignore"), "*\n")?;
        fs::write(release.join(".env.example"), EXAMPLE_ENV)?;
        fs::write(release.join("artisan"), "<?php\n")
    }

    fn generate_key(&self, cwd: &Path) -> std::io::Result<()> {
        // Goes through the release's .env link to the shared file
        let env = self.base.join(cwd).join(".env");
        let content = fs::read_to_string(&env)?;
        let updated: String = content
            .split_inclusive('\n')
            .map(|line| {
                if line.starts_with("APP_KEY=") {
                    format!("{GENERATED_KEY}\n")
                } else {
                    line.to_string()
                }
            })
            .collect();
        fs::write(&env, updated)
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, command: &CommandSpec) -> RunnerResult<CommandOutput> {
        let line = command.to_shell();
        self.log.borrow_mut().push(line.clone());

        let spawn = |source| RunnerError::Spawn {
            program: command.program.clone(),
            source,
        };

        if self.fail_program.as_deref() == Some(command.program.as_str()) {
            return Err(RunnerError::Failed {
                command: line,
                status: Some(1),
                stderr: format!("{}: simulated failure", command.program),
            });
        }

        let cwd = command.cwd.clone().unwrap_or_default();
        match (command.program.as_str(), command.args.first().map(String::as_str)) {
            ("git", Some("clone")) => {
                let dir = PathBuf::from(command.args.last().cloned().unwrap_or_default());
                self.clone_release(&dir).map_err(spawn)?;
                Ok(CommandOutput::new(""))
            }
            ("php", Some("artisan")) if command.args.get(1).map(String::as_str) == Some("key:generate") => {
                self.generate_key(&cwd).map_err(spawn)?;
                Ok(CommandOutput::new("Application key set successfully."))
            }
            _ => Ok(CommandOutput::new("")),
        }
    }
}
