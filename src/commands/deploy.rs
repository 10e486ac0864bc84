use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::warn;

use cutover::infrastructure::JsonEventSink;
use cutover::presentation::{create_remote_deploy_use_case, ConfigArgs};
use cutover::{config, CutoverError, DeployConfig, DeployEventSink, DeployOptions};

use super::plan::print_plan;
use super::{load_options, plan_release, print_config_warnings};
use crate::ui::context::UiContext;
use crate::ui::sink::ConsoleEventSink;
use crate::ui::terminal::stdin_is_interactive;
use crate::ui::views::deploy::{render_deploy_header, render_deploy_summary};

pub fn cmd_deploy(
    branch: Option<String>,
    yes: bool,
    dry_run: bool,
    args: &ConfigArgs,
    ui: &UiContext,
) -> Result<()> {
    let loaded = config::load(&load_options(args, branch))?;
    print_config_warnings(&loaded.warnings, ui);
    let config = loaded.config;
    let plan = plan_release(&config);

    if dry_run {
        return print_plan(&config, &plan, "deploy", ui);
    }

    if !ui.json {
        print!("{}", render_deploy_header(&config, &plan, ui.color, ui.unicode));
    }

    if !yes {
        confirm(&config, ui)?;
    }

    // Ctrl+C stops the run before the next step
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
        warn!(error = %e, "could not install Ctrl+C handler");
    }

    let (use_case, session) = create_remote_deploy_use_case(&config)
        .context("failed to prepare the SSH control directory")?;

    let sink: Arc<dyn DeployEventSink> = if ui.json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(ConsoleEventSink::stdout(ui))
    };

    let options = DeployOptions::new(config.destination()).with_cancel(cancel);
    let outcome = use_case.execute_with_events(&plan, &options, sink);
    session.close();
    let result = outcome?;

    if !ui.json {
        print!(
            "{}",
            render_deploy_summary(&config, &result, ui.color, ui.unicode)
        );
    }
    Ok(())
}

fn confirm(config: &DeployConfig, ui: &UiContext) -> Result<()> {
    if ui.json || !stdin_is_interactive() {
        bail!("refusing to deploy without confirmation; pass --yes to run non-interactively");
    }

    let confirmed = dialoguer::Confirm::new()
        .with_prompt(format!(
            "Deploy {} to {}?",
            config.branch,
            config.destination()
        ))
        .default(false)
        .interact()?;

    if !confirmed {
        return Err(CutoverError::Aborted { after: None }.into());
    }
    Ok(())
}
