//! Cutover CLI - symlink-swap release deployments over SSH
//!
//! Usage: cutover <COMMAND>
//!
//! Commands:
//!   deploy  Deploy a new release and make it live
//!   plan    Print the shell script a deploy would run
//!   check   Validate configuration without touching the target

mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;

use cutover::presentation::{Cli, Commands};
use ui::context::UiContext;

fn main() {
    let cli = Cli::parse();
    let ui = UiContext::new(cli.json, cli.verbose, cli.color);
    cutover::logging::init_logging(cli.verbose, ui.color);

    if let Err(err) = run(cli, &ui) {
        ui::error::print_error(&err, &ui);
        std::process::exit(1);
    }
}

fn run(cli: Cli, ui: &UiContext) -> Result<()> {
    match cli.command {
        Commands::Deploy {
            branch,
            yes,
            dry_run,
            config,
        } => commands::cmd_deploy(branch, yes, dry_run, &config, ui),
        Commands::Plan { branch, config } => commands::cmd_plan(branch, &config, ui),
        Commands::Check { config } => commands::cmd_check(&config, ui),
    }
}
