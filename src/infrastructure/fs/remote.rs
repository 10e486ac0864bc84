//! Remote File System Implementation
//!
//! Implements the TargetFs port with one shell command per operation over
//! an `SshSession`.

use std::path::Path;

use crate::domain::ports::command_runner::shell_path;
use crate::domain::ports::{FsError, FsResult, RunnerError, TargetFs};
use crate::domain::services::tmp_link;
use crate::infrastructure::ssh::SshSession;

/// Remote file system over SSH
pub struct RemoteFs {
    session: SshSession,
}

impl RemoteFs {
    pub fn new(session: SshSession) -> Self {
        Self { session }
    }

    pub fn destination(&self) -> &str {
        self.session.destination()
    }

    fn run(&self, command: &str, input: Option<&str>) -> FsResult<String> {
        self.session
            .exec(command, input)
            .map(|output| output.stdout)
            .map_err(into_fs_error)
    }

    /// `test -<flag>`: exit 1 is a plain "no", anything else is an error
    fn test(&self, flag: char, path: &Path) -> FsResult<bool> {
        match self.session.exec(&test_command(flag, path), None) {
            Ok(_) => Ok(true),
            Err(RunnerError::Failed {
                status: Some(1), ..
            }) => Ok(false),
            Err(e) => Err(into_fs_error(e)),
        }
    }
}

fn test_command(flag: char, path: &Path) -> String {
    format!("test -{flag} {}", shell_path(path))
}

fn into_fs_error(err: RunnerError) -> FsError {
    match err {
        RunnerError::Spawn { source, .. } => FsError::Io(source),
        RunnerError::Failed {
            command,
            status,
            stderr,
        } => FsError::Command {
            command,
            status,
            stderr,
        },
    }
}

fn write_commands(path: &Path) -> (String, String) {
    let p = shell_path(path);
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    let tmp = shell_path(Path::new(&tmp));
    (format!("cat > {tmp}"), format!("mv -f {tmp} {p}"))
}

fn replace_symlink_command(target: &Path, link: &Path) -> String {
    let tmp = shell_path(&tmp_link(link));
    format!(
        "ln -sfn {} {tmp} && mv -Tf {tmp} {}",
        shell_path(target),
        shell_path(link)
    )
}

impl TargetFs for RemoteFs {
    fn is_file(&self, path: &Path) -> FsResult<bool> {
        self.test('f', path)
    }

    fn is_dir(&self, path: &Path) -> FsResult<bool> {
        self.test('d', path)
    }

    fn is_symlink(&self, path: &Path) -> FsResult<bool> {
        self.test('h', path)
    }

    fn read(&self, path: &Path) -> FsResult<String> {
        self.run(&format!("cat {}", shell_path(path)), None)
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        // Write to temp file then rename over the target
        let (cat, mv) = write_commands(path);
        self.run(&cat, Some(content))?;
        self.run(&mv, None)?;
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        self.run(&format!("mkdir -p {}", shell_path(path)), None)?;
        Ok(())
    }

    fn copy(&self, from: &Path, to: &Path) -> FsResult<()> {
        self.run(&format!("cp -p {} {}", shell_path(from), shell_path(to)), None)?;
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> FsResult<()> {
        self.run(&format!("mv {} {}", shell_path(from), shell_path(to)), None)?;
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> FsResult<()> {
        self.run(&format!("rm -rf {}", shell_path(path)), None)?;
        Ok(())
    }

    fn remove_link(&self, path: &Path) -> FsResult<()> {
        self.run(&format!("rm {}", shell_path(path)), None)?;
        Ok(())
    }

    fn symlink(&self, target: &Path, link: &Path) -> FsResult<()> {
        self.run(
            &format!("ln -sn {} {}", shell_path(target), shell_path(link)),
            None,
        )?;
        Ok(())
    }

    fn replace_symlink(&self, target: &Path, link: &Path) -> FsResult<()> {
        self.run(&replace_symlink_command(target, link), None)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_quotes_odd_paths() {
        assert_eq!(test_command('h', Path::new("apps/shop/current")), "test -h apps/shop/current");
        assert_eq!(
            test_command('f', Path::new("my apps/.env")),
            "test -f 'my apps/.env'"
        );
    }

    #[test]
    fn write_goes_through_temp_file() {
        let (cat, mv) = write_commands(Path::new("apps/shop/.env"));
        assert_eq!(cat, "cat > apps/shop/.env.tmp");
        assert_eq!(mv, "mv -f apps/shop/.env.tmp apps/shop/.env");
    }

    #[test]
    fn replace_symlink_renames_over_link() {
        assert_eq!(
            replace_symlink_command(Path::new("20240101120000"), Path::new("apps/shop/current")),
            "ln -sfn 20240101120000 apps/shop/current.tmp && mv -Tf apps/shop/current.tmp apps/shop/current"
        );
    }

    #[test]
    fn runner_failure_maps_to_command_error() {
        let err = into_fs_error(RunnerError::Failed {
            command: "cat apps/shop/.env".into(),
            status: Some(1),
            stderr: "No such file or directory".into(),
        });
        assert!(matches!(err, FsError::Command { status: Some(1), .. }));
    }

    #[test]
    fn remote_fs_reports_destination() {
        let settings = crate::config::SshSettings {
            multiplex: false,
            ..Default::default()
        };
        let session = SshSession::new("deploy@host", &settings).unwrap();
        assert_eq!(RemoteFs::new(session).destination(), "deploy@host");
    }
}
