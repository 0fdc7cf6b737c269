use std::collections::HashMap;

use chrono::{DateTime, Local};
use serde::Serialize;

use super::Target;

/// Overlay shown while a network operation is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Loader {
    visible: bool,
}

impl Loader {
    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Success,
    Danger,
}

/// Inline alert rendered in the broadcast result panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub lines: Vec<String>,
}

impl Alert {
    pub fn danger(text: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Danger,
            lines: vec![text.into()],
        }
    }

    pub fn success(lines: Vec<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            lines,
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// One row of the top users list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopUserRow {
    pub name: String,
    /// Point count with its localized unit, e.g. `75 نقطة`
    pub points: String,
}

/// Everything the dashboard displays apart from charts.
#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    pub loader: Loader,
    texts: HashMap<Target, String>,
    pub top_users: Vec<TopUserRow>,
    /// Contents of the `broadcast-message` input
    pub broadcast_input: String,
    /// Contents of the `broadcast-result` panel
    pub broadcast_result: Option<Alert>,
    /// Alert the user must acknowledge before continuing
    pub blocking_alert: Option<String>,
    footer_year: Option<String>,
    pub last_updated: Option<DateTime<Local>>,
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, target: Target, value: impl Into<String>) {
        self.texts.insert(target, value.into());
    }

    pub fn text(&self, target: Target) -> Option<&str> {
        self.texts.get(&target).map(|s| s.as_str())
    }

    /// Text of `target`, or a dash before the first successful load
    pub fn text_or_placeholder(&self, target: Target) -> &str {
        self.text(target).unwrap_or("-")
    }

    /// Replace the top users list
    pub fn set_top_users(&mut self, rows: Vec<TopUserRow>) {
        self.top_users.clear();
        self.top_users.extend(rows);
    }

    /// Write the footer year into every footer slot
    pub fn stamp_footer_year(&mut self, year: i32) {
        self.footer_year = Some(year.to_string());
    }

    pub fn footer_year(&self) -> Option<&str> {
        self.footer_year.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.blocking_alert = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_is_idempotent() {
        let mut loader = Loader::default();
        assert!(!loader.is_visible());
        loader.show();
        loader.show();
        assert!(loader.is_visible());
        loader.hide();
        loader.hide();
        assert!(!loader.is_visible());
    }

    #[test]
    fn test_text_targets() {
        let mut view = DashboardView::new();
        assert_eq!(view.text_or_placeholder(Target::TotalUsers), "-");

        view.set_text(Target::TotalUsers, "42");
        assert_eq!(view.text(Target::TotalUsers), Some("42"));
        assert_eq!(view.text(Target::ActiveUsers), None);
    }

    #[test]
    fn test_set_top_users_replaces_rows() {
        let mut view = DashboardView::new();
        let row = |name: &str| TopUserRow {
            name: name.to_string(),
            points: "1 points".to_string(),
        };

        view.set_top_users(vec![row("a"), row("b")]);
        view.set_top_users(vec![row("c")]);

        assert_eq!(view.top_users, vec![row("c")]);
    }

    #[test]
    fn test_alert_text_joins_lines() {
        let alert = Alert::success(vec!["one".to_string(), "two".to_string()]);
        assert_eq!(alert.text(), "one\ntwo");
        assert_eq!(Alert::danger("x").kind, AlertKind::Danger);
    }
}
