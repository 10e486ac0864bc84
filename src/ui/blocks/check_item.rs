use crate::ui::primitives::icon::Icon;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warning,
    Error,
}

/// One line of the `check` report
#[derive(Debug, Clone)]
pub struct CheckItem {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub recommendation: Option<String>,
}

impl CheckItem {
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Pass, message)
    }

    pub fn warning(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Warning, message)
    }

    pub fn error(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Error, message)
    }

    fn new(name: impl Into<String>, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status,
            message: message.into(),
            recommendation: None,
        }
    }

    pub fn with_recommendation(mut self, rec: impl Into<String>) -> Self {
        self.recommendation = Some(rec.into());
        self
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let icon = match self.status {
            CheckStatus::Pass => Icon::Success,
            CheckStatus::Warning => Icon::Warning,
            CheckStatus::Error => Icon::Error,
        }
        .colored(supports_color, supports_unicode);

        let mut out = format!("  {} {} - {}\n", icon, self.name, self.message);
        if let Some(rec) = &self.recommendation {
            out.push_str(&format!(
                "    {} {}\n",
                Icon::Arrow.colored(supports_color, supports_unicode),
                rec
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_includes_recommendation_line() {
        let item = CheckItem::warning("acl_grup", "unknown key in cutover.toml")
            .with_recommendation("Did you mean 'acl_group'?");

        let rendered = item.render(false, false);
        assert!(rendered.contains("[WARN] acl_grup - unknown key in cutover.toml"));
        assert!(rendered.contains("[>] Did you mean 'acl_group'?"));
    }

    #[test]
    fn pass_has_no_recommendation() {
        let rendered = CheckItem::pass("TARGET_SERVER", "set").render(false, true);
        assert_eq!(rendered, "  ✓ TARGET_SERVER - set\n");
    }
}
