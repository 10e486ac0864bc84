use anyhow::Result;

use cutover::presentation::ConfigArgs;
use cutover::{config, render_script, DeployConfig, DeployPlan};

use super::{load_options, plan_release, print_config_warnings};
use crate::ui::context::UiContext;

pub fn cmd_plan(branch: Option<String>, args: &ConfigArgs, ui: &UiContext) -> Result<()> {
    let loaded = config::load(&load_options(args, branch))?;
    print_config_warnings(&loaded.warnings, ui);

    let plan = plan_release(&loaded.config);
    print_plan(&loaded.config, &plan, "plan", ui)
}

/// Print the script for `plan`, shared with `deploy --dry-run`
pub(super) fn print_plan(
    config: &DeployConfig,
    plan: &DeployPlan,
    command: &str,
    ui: &UiContext,
) -> Result<()> {
    let script = render_script(plan);

    if ui.json {
        let steps: Vec<String> = plan.steps().iter().map(|s| s.name()).collect();
        crate::ui::json::emit(serde_json::json!({
            "event": "plan",
            "command": command,
            "release": plan.layout().release().as_str(),
            "destination": config.destination(),
            "steps": steps,
            "script": script,
        }))?;
    } else {
        print!("{script}");
    }
    Ok(())
}
