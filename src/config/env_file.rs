//! Dotenv file parsing
//!
//! Accepts the subset of dotenv syntax deploy config files use:
//! `KEY=value`, optional `export ` prefix, `#` comments, single-quoted
//! literals and double-quoted values with `\n`, `\"` and `\\` escapes.
//! Unquoted values end at ` #`.

use std::path::Path;

use crate::error::ConfigError;

/// Parse dotenv `content`; `file` is only used for error messages
pub fn parse_env_file(content: &str, file: &Path) -> Result<Vec<(String, String)>, ConfigError> {
    let mut vars = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        let error = |message: &str| ConfigError::EnvFile {
            file: file.to_path_buf(),
            line: index + 1,
            message: message.to_string(),
        };

        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line).trim_start();

        let Some((key, value)) = line.split_once('=') else {
            return Err(error("expected KEY=value"));
        };
        let key = key.trim();
        if !is_valid_key(key) {
            return Err(error(&format!("invalid variable name '{key}'")));
        }

        let value = parse_value(value.trim()).map_err(error)?;
        vars.push((key.to_string(), value));
    }

    Ok(vars)
}

fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

fn parse_value(value: &str) -> Result<String, &'static str> {
    if let Some(rest) = value.strip_prefix('\'') {
        let end = rest.find('\'').ok_or("unterminated single quote")?;
        return Ok(rest[..end].to_string());
    }

    if let Some(rest) = value.strip_prefix('"') {
        let mut out = String::new();
        let mut chars = rest.chars();
        while let Some(c) = chars.next() {
            match c {
                '"' => return Ok(out),
                '\\' => match chars.next() {
                    Some('n') => out.push('\n'),
                    Some('r') => out.push('\r'),
                    Some('t') => out.push('\t'),
                    Some(other) => out.push(other),
                    None => break,
                },
                _ => out.push(c),
            }
        }
        return Err("unterminated double quote");
    }

    let unquoted = match value.find(" #") {
        Some(pos) => &value[..pos],
        None => value,
    };
    Ok(unquoted.trim_end().to_string())
}
