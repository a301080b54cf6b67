//! Message area rendering for rejected sequences and other notices.

use crate::command::ParseError;
use crate::theme::colors::ThemeColors;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Message severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Warning,
    Error,
}

/// A message shown below the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub level: MessageLevel,
}

impl Message {
    pub fn new(text: impl Into<String>, level: MessageLevel) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }

    /// Joins the errors of a rejected sequence into one error message.
    pub fn from_errors(errors: &[ParseError]) -> Self {
        let text = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Self::new(text, MessageLevel::Error)
    }
}

/// Renders the message area at the bottom of the screen; empty when there is
/// no message.
pub fn render_message_area(
    f: &mut Frame,
    area: Rect,
    message: Option<&Message>,
    colors: &ThemeColors,
) {
    let content = match message {
        Some(message) => {
            let color = match message.level {
                MessageLevel::Error => colors.error,
                MessageLevel::Warning => colors.warning,
            };
            Line::from(vec![Span::styled(
                message.text.clone(),
                Style::default().fg(color),
            )])
        }
        None => Line::from(""),
    };

    let paragraph =
        Paragraph::new(content).style(Style::default().bg(colors.background).fg(colors.foreground));

    f.render_widget(paragraph, area);
}
