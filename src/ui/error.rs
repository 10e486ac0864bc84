use cutover::{ConfigError, CutoverError};

use crate::ui::blocks::error::ErrorBlock;
use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;

fn config_error_block(err: &ConfigError) -> ErrorBlock {
    match err {
        ConfigError::MissingKeys(keys) => keys
            .iter()
            .fold(
                ErrorBlock::new("Missing or empty required settings"),
                |block, key| block.with_detail(format!("- {key}")),
            )
            .with_fix("Set them in config/.env or the environment, then run `cutover check`"),
        ConfigError::EnvFile {
            file,
            line,
            message,
        } => ErrorBlock::new(message.as_str())
            .with_file(file)
            .with_line(*line)
            .with_file_context(1, 1)
            .with_fix("Use one KEY=value pair per line"),
        ConfigError::InvalidValue { key, message } => {
            ErrorBlock::new(format!("Invalid value for {key}"))
                .with_detail(message.as_str())
                .with_fix("Keep each setting on a single line")
        }
        ConfigError::InvalidSettings { file, message } => ErrorBlock::new("Invalid settings file")
            .with_file(file)
            .with_detail(message.trim())
            .with_fix("Valid values: cutover = swap|atomic, env_backup = copy|move"),
        ConfigError::Io { file, source } => {
            ErrorBlock::new(format!("Cannot read {}: {}", file.display(), source))
        }
    }
}

fn cutover_error_block(err: &CutoverError) -> ErrorBlock {
    match err {
        CutoverError::Config(config) => config_error_block(config),
        CutoverError::StepFailed { number, step, source } => {
            ErrorBlock::new(format!("Step {number} ({step}) failed"))
                .with_detail(source.to_string())
                .with_fix(
                    "Nothing was rolled back. Inspect the target before deploying again.",
                )
        }
        other => ErrorBlock::new(other.to_string()),
    }
}

pub fn format_error_with(err: &anyhow::Error, supports_color: bool, supports_unicode: bool) -> String {
    if let Some(CutoverError::Aborted { .. }) = err.downcast_ref::<CutoverError>() {
        return format!("{} {}\n", Icon::Warning.colored(supports_color, supports_unicode), err);
    }

    let block = if let Some(e) = err.downcast_ref::<CutoverError>() {
        cutover_error_block(e)
    } else if let Some(e) = err.downcast_ref::<ConfigError>() {
        config_error_block(e)
    } else {
        let mut block = ErrorBlock::new(err.to_string());
        for cause in err.chain().skip(1) {
            block = block.with_detail(format!("caused by: {cause}"));
        }
        block
    };
    block.render(supports_color, supports_unicode)
}

fn missing_keys(err: &anyhow::Error) -> &[String] {
    if let Some(CutoverError::Config(e)) = err.downcast_ref::<CutoverError>() {
        return e.missing_keys();
    }
    err.downcast_ref::<ConfigError>()
        .map(ConfigError::missing_keys)
        .unwrap_or(&[])
}

pub fn error_event(err: &anyhow::Error) -> serde_json::Value {
    let mut event = serde_json::json!({
        "event": "error",
        "message": err.to_string(),
    });
    let keys = missing_keys(err);
    if !keys.is_empty() {
        event["missing_keys"] = serde_json::json!(keys);
    }
    event
}

/// `::error` workflow command so the failure shows up in the Actions UI
fn github_actions_annotation(message: &str) -> String {
    let escaped = message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    format!("::error title=Cutover::{escaped}")
}

pub fn print_error(err: &anyhow::Error, ui: &UiContext) {
    if ui.json {
        let _ = crate::ui::json::emit(error_event(err));
        return;
    }

    if ui.caps.is_ci && std::env::var("GITHUB_ACTIONS").is_ok() {
        println!("{}", github_actions_annotation(&err.to_string()));
    }

    eprint!("{}", format_error_with(err, ui.color, ui.unicode));
}
