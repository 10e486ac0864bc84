use std::path::Path;

use cutover::config::{ConfigWarning, REQUIRED_KEYS};
use cutover::DeployConfig;

use crate::ui::blocks::check_item::CheckItem;
use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::primitives::icon::Icon;

/// What `cutover check` found
pub struct CheckReport<'a> {
    pub missing: &'a [String],
    pub warnings: &'a [ConfigWarning],
    /// Present when every required key is set
    pub config: Option<&'a DeployConfig>,
}

impl CheckReport<'_> {
    pub fn passed(&self) -> bool {
        self.missing.is_empty()
    }
}

pub fn render_check_header(
    env_file: &Path,
    settings_file: Option<&Path>,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Check, "Cutover Check");
    header.add("Env file", env_file.display().to_string());
    header.add(
        "Settings",
        settings_file
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in defaults".to_string()),
    );
    header.render(supports_color, supports_unicode)
}

pub fn render_check_report(
    report: &CheckReport<'_>,
    env_file: &Path,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut out = String::from("\nRequired settings\n");
    for key in REQUIRED_KEYS {
        let item = if report.missing.iter().any(|m| m == key) {
            CheckItem::error(key, "missing or empty").with_recommendation(format!(
                "Add {key}=... to {} or export it",
                env_file.display()
            ))
        } else {
            CheckItem::pass(key, "set")
        };
        out.push_str(&item.render(supports_color, supports_unicode));
    }

    if !report.warnings.is_empty() {
        out.push_str("\nSettings file\n");
        for warning in report.warnings {
            let location = match warning.line {
                Some(line) => format!("{}:{}", warning.file.display(), line),
                None => warning.file.display().to_string(),
            };
            let mut item = CheckItem::warning(&warning.key, format!("unknown key ({location})"));
            if let Some(suggestion) = &warning.suggestion {
                item = item.with_recommendation(format!("Did you mean '{suggestion}'?"));
            }
            out.push_str(&item.render(supports_color, supports_unicode));
        }
    }

    if let Some(config) = report.config {
        let deploy = &config.settings.deploy;
        out.push_str("\nDeploy\n");
        for item in [
            CheckItem::pass("target", config.destination()),
            CheckItem::pass("branch", config.branch.as_str()),
            CheckItem::pass("cutover", deploy.cutover.as_str()),
            CheckItem::pass("env_backup", deploy.env_backup.as_str()),
            CheckItem::pass("acl_group", deploy.acl_group.as_str()),
        ] {
            out.push_str(&item.render(supports_color, supports_unicode));
        }
    }

    out
}

pub fn render_check_summary(
    report: &CheckReport<'_>,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut summary = if !report.passed() {
        ResultSummary::partial("Check FAILED")
    } else if !report.warnings.is_empty() {
        ResultSummary::partial("Check passed with warnings")
    } else {
        ResultSummary::success("Configuration is ready")
    };

    if !report.missing.is_empty() {
        summary.add_stat("missing required settings", report.missing.len());
    }
    if !report.warnings.is_empty() {
        summary.add_stat("unknown settings keys", report.warnings.len());
    }
    if report.passed() {
        summary.with_next_step("Run `cutover plan` to review the deploy script");
    }

    summary.render(supports_color, supports_unicode)
}
