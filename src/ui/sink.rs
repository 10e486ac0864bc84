//! Terminal progress for a running deploy

use std::io::{self, Write};
use std::sync::Mutex;

use cutover::{DeployEvent, DeployEventSink};

use crate::ui::components::diff::render_changed_lines;
use crate::ui::context::UiContext;
use crate::ui::views::deploy::{
    render_missing_env_keys, render_step_failed, render_step_output, render_step_skipped,
    render_step_started,
};

struct Progress {
    writer: Box<dyn Write + Send>,
    total: usize,
}

/// Event sink printing one line per step, with command output indented
/// under it. `-v` adds the `.env` diff.
pub struct ConsoleEventSink {
    progress: Mutex<Progress>,
    verbose: u8,
    color: bool,
    unicode: bool,
}

impl ConsoleEventSink {
    pub fn stdout(ui: &UiContext) -> Self {
        Self::with_writer(ui, io::stdout())
    }

    pub fn with_writer<W: Write + Send + 'static>(ui: &UiContext, writer: W) -> Self {
        Self {
            progress: Mutex::new(Progress {
                writer: Box::new(writer),
                total: 0,
            }),
            verbose: ui.verbose,
            color: ui.color,
            unicode: ui.unicode,
        }
    }

    fn render(&self, event: &DeployEvent, total: usize) -> String {
        let (color, unicode) = (self.color, self.unicode);
        match event {
            DeployEvent::StepStarted {
                number,
                description,
                ..
            } => render_step_started(*number, total, description, color, unicode),
            DeployEvent::StepSkipped { reason, .. } => render_step_skipped(reason, color, unicode),
            DeployEvent::StepOutput { output, .. } => render_step_output(output, color),
            DeployEvent::EnvKeysMissing { keys, .. } => {
                render_missing_env_keys(keys, color, unicode)
            }
            DeployEvent::EnvRewritten {
                path,
                before,
                after,
            } if self.verbose > 0 => {
                let diff = render_changed_lines(&path.display().to_string(), before, after, color);
                diff.lines().map(|line| format!("    {line}\n")).collect()
            }
            DeployEvent::StepFailed { error, .. } => render_step_failed(error, color, unicode),
            DeployEvent::Started { .. }
            | DeployEvent::EnvRewritten { .. }
            | DeployEvent::StepCompleted { .. }
            | DeployEvent::Completed { .. } => String::new(),
        }
    }
}

impl DeployEventSink for ConsoleEventSink {
    fn on_event(&self, event: DeployEvent) {
        let Ok(mut progress) = self.progress.lock() else {
            return;
        };
        if let DeployEvent::Started { step_count, .. } = &event {
            progress.total = *step_count;
        }

        let text = self.render(&event, progress.total);
        if !text.is_empty() {
            let _ = progress.writer.write_all(text.as_bytes());
            let _ = progress.writer.flush();
        }
    }
}
