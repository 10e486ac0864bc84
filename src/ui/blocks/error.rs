use std::path::{Path, PathBuf};

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// An error with optional location, source excerpt and fix
#[derive(Debug, Clone)]
pub struct ErrorBlock {
    message: String,
    file: Option<PathBuf>,
    line: Option<usize>,
    details: Vec<String>,
    code_context: Option<Vec<(usize, String, bool)>>, // (line_no, content, highlight)
    fix: Option<String>,
}

impl ErrorBlock {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            file: None,
            line: None,
            details: Vec::new(),
            code_context: None,
            fix: None,
        }
    }

    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }

    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }

    /// Show `before`/`after` lines of the file around the error line
    pub fn with_file_context(mut self, before: usize, after: usize) -> Self {
        let (Some(file), Some(line)) = (&self.file, self.line) else {
            return self;
        };
        self.code_context = read_code_context(file, line, before, after);
        self
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let mut out = format!(
            "{} {}\n",
            Icon::Error.colored(supports_color, supports_unicode),
            ColoredText::error(self.message.as_str())
                .bold()
                .render(supports_color)
        );

        if let Some(file) = &self.file {
            let location = match self.line {
                Some(line) => format!("{}:{}", file.display(), line),
                None => file.display().to_string(),
            };
            out.push_str(&format!("  {}\n", ColoredText::dim(location).render(supports_color)));
        }

        for detail in &self.details {
            out.push_str(&format!("  {detail}\n"));
        }

        if let Some(lines) = &self.code_context {
            out.push('\n');
            for (no, text, highlight) in lines {
                let prefix = if *highlight { ">" } else { " " };
                let text = if *highlight {
                    ColoredText::error(text.as_str()).render(supports_color)
                } else {
                    text.clone()
                };
                out.push_str(&format!("  {prefix} {no:>4} | {text}\n"));
            }
        }

        if let Some(fix) = &self.fix {
            out.push_str(&format!(
                "\n{} {}\n",
                Icon::Arrow.colored(supports_color, supports_unicode),
                fix
            ));
        }

        out
    }
}

fn read_code_context(
    file: &Path,
    line: usize,
    before: usize,
    after: usize,
) -> Option<Vec<(usize, String, bool)>> {
    let content = std::fs::read_to_string(file).ok()?;
    let lines: Vec<&str> = content.lines().collect();
    if line == 0 || line > lines.len() {
        return None;
    }

    let start = line.saturating_sub(before).saturating_sub(1);
    let end = (line + after).min(lines.len());

    Some(
        lines[start..end]
            .iter()
            .enumerate()
            .map(|(idx, text)| {
                let line_no = start + idx + 1;
                (line_no, (*text).to_string(), line_no == line)
            })
            .collect(),
    )
}
