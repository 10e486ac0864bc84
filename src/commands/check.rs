use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;

use cutover::config::{
    load_env, load_settings, resolve, with_env_overrides, ConfigWarning, DEFAULT_ENV_FILE,
};
use cutover::presentation::ConfigArgs;
use cutover::DeployConfig;

use crate::ui::context::UiContext;
use crate::ui::views::check::{
    render_check_header, render_check_report, render_check_summary, CheckReport,
};

/// Validate configuration without contacting the target
///
/// Exits with status 1 when a required setting is missing.
pub fn cmd_check(args: &ConfigArgs, ui: &UiContext) -> Result<()> {
    let env_file = args
        .env_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ENV_FILE));

    let vars = load_env(args.env_file.as_deref(), std::env::vars())?;
    let (settings, warnings, settings_file) = load_settings(args.config.as_deref())?;
    let settings = with_env_overrides(settings, &vars);

    let (config, missing) = match resolve(&vars, settings, None) {
        Ok(config) => (Some(config), Vec::new()),
        Err(e) if !e.missing_keys().is_empty() => (None, e.missing_keys().to_vec()),
        Err(e) => return Err(e.into()),
    };

    let report = CheckReport {
        missing: &missing,
        warnings: &warnings,
        config: config.as_ref(),
    };

    if ui.json {
        crate::ui::json::emit(check_event(&report, settings_file.as_deref()))?;
    } else {
        print!(
            "{}",
            render_check_header(&env_file, settings_file.as_deref(), ui.color, ui.unicode)
        );
        print!(
            "{}",
            render_check_report(&report, &env_file, ui.color, ui.unicode)
        );
        print!("{}", render_check_summary(&report, ui.color, ui.unicode));
    }

    if !report.passed() {
        let _ = std::io::stdout().flush();
        std::process::exit(1);
    }
    Ok(())
}

fn warning_json(warning: &ConfigWarning) -> serde_json::Value {
    serde_json::json!({
        "key": warning.key,
        "file": warning.file.display().to_string(),
        "line": warning.line,
        "suggestion": warning.suggestion,
    })
}

fn check_event(report: &CheckReport<'_>, settings_file: Option<&Path>) -> serde_json::Value {
    serde_json::json!({
        "event": "check",
        "command": "check",
        "status": if report.passed() { "pass" } else { "fail" },
        "missing_keys": report.missing,
        "warnings": report.warnings.iter().map(warning_json).collect::<Vec<_>>(),
        "settings_file": settings_file.map(|p| p.display().to_string()),
        "destination": report.config.map(DeployConfig::destination),
    })
}
