use cutover::{DeployConfig, DeployPlan, DeployResult};

use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn render_deploy_header(
    config: &DeployConfig,
    plan: &DeployPlan,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Deploy, "Cutover Deploy");
    header.add("Target", config.destination());
    header.add("Repository", config.repository.as_str());
    header.add("Branch", config.branch.as_str());
    header.add("Release", plan.layout().release().as_str());
    header.add("App", format!("{} ({})", config.app.name, config.app.env));
    header.add("Cutover", config.settings.deploy.cutover.as_str());
    header.render(supports_color, supports_unicode)
}

/// `[ 3/17]` with the counter padded to the total's width
pub fn step_counter(number: usize, total: usize) -> String {
    let width = total.max(1).to_string().len();
    format!("[{number:>width$}/{total}]")
}

pub fn render_step_started(
    number: usize,
    total: usize,
    description: &str,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    format!(
        "{} {} {}\n",
        ColoredText::dim(step_counter(number, total)).render(supports_color),
        Icon::Progress.colored(supports_color, supports_unicode),
        description
    )
}

pub fn render_step_skipped(reason: &str, supports_color: bool, supports_unicode: bool) -> String {
    format!(
        "    {} {}\n",
        Icon::Skipped.colored(supports_color, supports_unicode),
        ColoredText::dim(format!("skipped: {reason}")).render(supports_color)
    )
}

pub fn render_step_output(output: &str, supports_color: bool) -> String {
    output
        .lines()
        .map(|line| format!("    {}\n", ColoredText::dim(line).render(supports_color)))
        .collect()
}

pub fn render_step_failed(error: &str, supports_color: bool, supports_unicode: bool) -> String {
    format!(
        "    {} {}\n",
        Icon::Error.colored(supports_color, supports_unicode),
        ColoredText::error(error).render(supports_color)
    )
}

pub fn render_missing_env_keys(
    keys: &[String],
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    format!(
        "    {} {} not found in .env, left unset\n",
        Icon::Warning.colored(supports_color, supports_unicode),
        keys.join(", ")
    )
}

pub fn render_deploy_summary(
    config: &DeployConfig,
    result: &DeployResult,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut summary = ResultSummary::success(format!("Release {} is live", result.release));
    summary.add_stat("steps run", result.executed.len());
    summary.add_stat("steps skipped", result.skipped.len());

    if let Some(backup) = &result.env_backup {
        summary.add_stat("previous .env archived to", backup.display());
    }
    if result.storage_promoted {
        summary.add_warning("first deploy: storage/ promoted to shared storage");
    }
    if result.key_generated {
        summary.add_warning("APP_KEY was generated; keep a copy of the shared .env");
    }
    summary.with_next_step(format!("Visit {}", config.app.url));

    summary.render(supports_color, supports_unicode)
}
