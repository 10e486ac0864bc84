use crossterm::style::Stylize;
use similar::{ChangeTag, TextDiff};

use crate::ui::theme;

/// Unified-style diff listing only changed lines, with line numbers
///
/// Unchanged lines are left out: the `.env` being diffed holds secrets that
/// the rewrite never touches.
pub fn render_changed_lines(path: &str, old: &str, new: &str, supports_color: bool) -> String {
    let diff = TextDiff::from_lines(old, new);
    let width = old
        .lines()
        .count()
        .max(new.lines().count())
        .max(1)
        .to_string()
        .len();

    let mut out = String::new();
    for header in [format!("--- a/{path}"), format!("+++ b/{path}")] {
        out.push_str(&paint(&header, None, supports_color));
        out.push('\n');
    }

    for change in diff.iter_all_changes() {
        let (number, sign) = match change.tag() {
            ChangeTag::Delete => (change.old_index(), "-"),
            ChangeTag::Insert => (change.new_index(), "+"),
            ChangeTag::Equal => continue,
        };
        let number = number
            .map(|i| format!("{:>width$}", i + 1))
            .unwrap_or_else(|| " ".repeat(width));

        let value = change.value().trim_end_matches('\n');
        let line = format!("{number} {sign} {value}");
        out.push_str(&paint(&line, Some(change.tag()), supports_color));
        out.push('\n');
    }

    out
}

fn paint(s: &str, tag: Option<ChangeTag>, supports_color: bool) -> String {
    if !supports_color {
        return s.to_string();
    }

    match tag {
        None => format!("{}", s.with(theme::colors::INFO)),
        Some(ChangeTag::Delete) => format!("{}", s.with(theme::colors::ERROR)),
        Some(ChangeTag::Insert) => format!("{}", s.with(theme::colors::SUCCESS)),
        Some(ChangeTag::Equal) => format!("{}", s.with(theme::colors::DIM)),
    }
}
