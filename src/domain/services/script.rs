//! Shell rendering of a deploy plan
//!
//! Used by `cutover plan` and `deploy --dry-run`: the script is what an
//! operator would paste into a remote shell to perform the same deploy.

use std::fmt::Write as _;
use std::path::Path;

use crate::domain::ports::command_runner::{shell_path, shell_quote};
use crate::domain::ports::CommandSpec;
use crate::domain::value_objects::{CutoverMode, EnvBackupMode};

use super::env_file::{format_env_value, APP_KEY_MARKER};
use super::planner::{DeployPlan, Step};

const INDENT: &str = "    ";

/// Render the plan as a POSIX shell script that stops on first error
pub fn render_script(plan: &DeployPlan) -> String {
    let layout = plan.layout();
    let total = plan.len();
    let env = shell_path(&layout.shared_env());

    let mut out = String::from("#!/bin/sh\nset -e\n");
    for (i, step) in plan.steps().iter().enumerate() {
        let _ = writeln!(
            out,
            "\necho {}",
            shell_quote(&format!(
                "=> [{}/{}] {}",
                i + 1,
                total,
                step.description(layout)
            ))
        );

        let body = match step {
            Step::EnsureDirectory { path } => {
                let p = shell_path(path);
                format!("if [ ! -d {p} ]; then\n{INDENT}mkdir -p {p}\nfi")
            }
            Step::CloneRelease { command } => command.to_shell(),
            Step::BackupEnv { backup, mode } => {
                let verb = match mode {
                    EnvBackupMode::Copy => "cp",
                    EnvBackupMode::Move => "mv",
                };
                format!(
                    "if [ -f {env} ]; then\n{INDENT}{verb} {env} {}\nfi",
                    shell_path(backup)
                )
            }
            Step::SeedEnv { example } => format!(
                "if [ ! -f {env} ]; then\n{INDENT}cp {} {env}\nfi",
                shell_path(example)
            ),
            Step::RewriteEnv { values } => {
                let mut line = String::from("sed -i");
                for (key, value) in values {
                    let expr = format!(
                        "s%^{key}=.*%{key}={}%",
                        sed_replacement(&format_env_value(value))
                    );
                    let _ = write!(line, " -e {}", shell_quote(&expr));
                }
                let _ = write!(line, " {env}");
                line
            }
            Step::LinkShared { slot, release_dir } => format!(
                "ln -s ../{} {}",
                slot.name(),
                shell_path(&release_dir.join(slot.name()))
            ),
            Step::ShareStorage {
                release_storage,
                acl,
            } => {
                let shared = layout.shared_storage();
                format!(
                    "if [ ! -d {shared} ]; then\n{INDENT}mv {release} {shared}\n{INDENT}{grant}\nelse\n{INDENT}rm -rf {release}\nfi",
                    shared = shell_path(&shared),
                    release = shell_path(release_storage),
                    grant = acl.command(&shared).to_shell(),
                )
            }
            Step::GrantAcl { path, acl } => acl.command(path).to_shell(),
            Step::Cutover { link, target, mode } => render_cutover(link, target, *mode),
            Step::Exec { command, .. } => subshell(command),
            Step::GenerateKey { command } => format!(
                "if ! grep '^APP_KEY=' {env} | grep -q {}; then\n{INDENT}{}\nfi",
                shell_quote(APP_KEY_MARKER),
                subshell(command)
            ),
        };
        out.push_str(&body);
        out.push('\n');
    }
    out
}

fn render_cutover(link: &Path, target: &Path, mode: CutoverMode) -> String {
    let l = shell_path(link);
    let t = shell_path(target);
    match mode {
        CutoverMode::Swap => {
            format!("if [ -h {l} ]; then\n{INDENT}rm {l}\nfi\nln -s {t} {l}")
        }
        CutoverMode::Atomic => {
            let tmp = shell_path(&tmp_link(link));
            format!("ln -sfn {t} {tmp}\nmv -Tf {tmp} {l}")
        }
    }
}

/// Sibling path used to stage an atomic symlink swap
pub fn tmp_link(link: &Path) -> std::path::PathBuf {
    let mut name = link
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    link.with_file_name(name)
}

/// Run commands with a working directory in a subshell so the script's
/// own directory never changes
fn subshell(command: &CommandSpec) -> String {
    if command.cwd.is_some() {
        format!("({})", command.to_shell())
    } else {
        command.to_shell()
    }
}

fn sed_replacement(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('&', "\\&")
}
