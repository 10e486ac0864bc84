//! Line-scoped editing of dotenv content

/// Value prefix of a generated application key
pub const APP_KEY_MARKER: &str = "base64:";

/// Outcome of [`rewrite_env`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvRewrite {
    pub content: String,
    /// Keys whose line was found and rewritten
    pub replaced: Vec<String>,
    /// Keys with no `KEY=` line; they are not appended
    pub missing: Vec<String>,
}

impl EnvRewrite {
    pub fn changed(&self, original: &str) -> bool {
        self.content != original
    }
}

/// Replace the values of `values` keys, leaving every other line untouched.
///
/// A line matches a key only when it starts with exactly `KEY=`; a key
/// mentioned inside another line's value, or a longer key sharing the
/// prefix, does not match. Line endings are preserved.
pub fn rewrite_env(content: &str, values: &[(String, String)]) -> EnvRewrite {
    let mut out = String::with_capacity(content.len());
    let mut replaced: Vec<String> = Vec::new();

    for line in content.split_inclusive('\n') {
        let (body, ending) = split_line_ending(line);
        let matched = values
            .iter()
            .find(|(key, _)| body.strip_prefix(key.as_str()).is_some_and(|r| r.starts_with('=')));

        match matched {
            Some((key, value)) => {
                out.push_str(key);
                out.push('=');
                out.push_str(&format_env_value(value));
                out.push_str(ending);
                if !replaced.contains(key) {
                    replaced.push(key.clone());
                }
            }
            None => out.push_str(line),
        }
    }

    let missing = values
        .iter()
        .filter(|(key, _)| !replaced.contains(key))
        .map(|(key, _)| key.clone())
        .collect();

    EnvRewrite {
        content: out,
        replaced,
        missing,
    }
}

/// Whether an `APP_KEY=` line already carries a generated key
pub fn has_app_key(content: &str) -> bool {
    content
        .lines()
        .filter(|line| line.starts_with("APP_KEY="))
        .any(|line| line.contains(APP_KEY_MARKER))
}

/// Render a value for a dotenv line, double-quoting when the bare value
/// would not survive a dotenv parser. Line breaks are escaped so the value
/// stays on one line.
pub fn format_env_value(value: &str) -> String {
    let single_line = !value.chars().any(char::is_control);
    let already_quoted = single_line
        && value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));
    let needs_quotes = !already_quoted
        && value
            .chars()
            .any(|c| {
                c.is_whitespace() || c.is_control() || matches!(c, '#' | '"' | '\'' | '$' | '\\')
            });

    if needs_quotes {
        let escaped = value
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('$', "\\$")
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}
