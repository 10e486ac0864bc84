//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! Global flags (--json, --color, --verbose) are inherited by all subcommands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// Cutover - symlink-swap release deployments over SSH
#[derive(Parser, Debug)]
#[command(name = "cutover")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Required settings are read from the environment or config/.env.")]
pub struct Cli {
    /// Output format for CI (NDJSON events)
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where configuration comes from
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigArgs {
    /// Dotenv file with the required settings [default: config/.env]
    #[arg(long, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Settings file [default: cutover.toml, then ~/.config/cutover/config.toml]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deploy a new release and make it live
    Deploy {
        /// Branch to deploy (overrides BRANCH)
        #[arg(short, long)]
        branch: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Print the deploy script instead of running it
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Print the shell script a deploy would run
    Plan {
        /// Branch to deploy (overrides BRANCH)
        #[arg(short, long)]
        branch: Option<String>,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Validate configuration without touching the target
    Check {
        #[command(flatten)]
        config: ConfigArgs,
    },
}
