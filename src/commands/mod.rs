//! Subcommand entry points
//!
//! Each command loads configuration, does its work through the library and
//! renders the outcome for the terminal or as NDJSON.

pub mod check;
pub mod deploy;
pub mod plan;

pub use check::cmd_check;
pub use deploy::cmd_deploy;
pub use plan::cmd_plan;

use cutover::config::{ConfigWarning, LoadOptions};
use cutover::presentation::ConfigArgs;
use cutover::{DeployConfig, DeployPlan, Planner, ReleaseId};

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;

fn load_options(args: &ConfigArgs, branch: Option<String>) -> LoadOptions {
    LoadOptions {
        env_file: args.env_file.clone(),
        settings_file: args.config.clone(),
        branch,
    }
}

/// Plan a deploy of a release stamped now
fn plan_release(config: &DeployConfig) -> DeployPlan {
    let release = ReleaseId::now();
    tracing::debug!(%release, "planning release");
    Planner::new(config.plan_settings()).plan(config.layout(release))
}

/// Unknown settings keys go to stderr so stdout stays machine-readable
fn print_config_warnings(warnings: &[ConfigWarning], ui: &UiContext) {
    for warning in warnings {
        let location = match warning.line {
            Some(line) => format!("{}:{}", warning.file.display(), line),
            None => warning.file.display().to_string(),
        };
        let hint = warning
            .suggestion
            .as_ref()
            .map(|s| format!(" (did you mean '{s}'?)"))
            .unwrap_or_default();
        eprintln!(
            "{} Unknown setting '{}' in {}{}",
            Icon::Warning.colored(ui.color, ui.unicode),
            warning.key,
            location,
            hint
        );
    }
}
