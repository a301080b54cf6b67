//! Status line widget.
//!
//! The status line shows:
//! - The mode indicator (`-- INSERT --`, empty in Normal mode)
//! - The keys of a sequence still awaiting input, right-aligned
//!
//! Example status line: `-- VISUAL --                                   f`

use crate::mode::StatusDisplay;
use crate::theme::colors::ThemeColors;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Status display that remembers the last mode text pushed to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLine {
    text: String,
}

impl StatusLine {
    /// Mode indicator as drawn, e.g. `-- INSERT --`.
    pub fn indicator(&self) -> String {
        if self.text.is_empty() {
            String::new()
        } else {
            format!("-- {} --", self.text)
        }
    }
}

impl StatusDisplay for StatusLine {
    fn show(&mut self, text: &str) {
        self.text = text.to_string();
    }
}

/// Renders the mode indicator and the pending keys.
pub fn render_status_line(
    f: &mut Frame,
    area: Rect,
    status: &StatusLine,
    pending_keys: &[String],
    colors: &ThemeColors,
) {
    let indicator = status.indicator();
    let pending = pending_keys.join(" ");

    let total_width = area.width as usize;
    let used = indicator.chars().count() + pending.chars().count();
    let padding = if used + 1 < total_width {
        total_width - used
    } else {
        1
    };

    let default_style = Style::default()
        .fg(colors.status_line_fg)
        .bg(colors.status_line_bg);
    let pending_style = Style::default().fg(colors.info).bg(colors.status_line_bg);

    let line = Line::from(vec![
        Span::styled(indicator, default_style),
        Span::styled(" ".repeat(padding), default_style),
        Span::styled(pending, pending_style),
    ]);

    f.render_widget(Paragraph::new(line), area);
}
