//! Executor that records resolved queues, and the view that renders them.

use crate::command::Operation;
use crate::mode::Executor;
use crate::theme::colors::ThemeColors;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::collections::VecDeque;

/// Default number of queues kept.
pub const DEFAULT_HISTORY: usize = 200;

/// Records every queue handed to it, keeping the most recent `limit` ones.
#[derive(Debug, Clone)]
pub struct Transcript {
    entries: VecDeque<Vec<Operation>>,
    limit: usize,
    executed: usize,
}

impl Transcript {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: limit.max(1),
            executed: 0,
        }
    }

    /// Recorded queues, oldest first.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &Vec<Operation>> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&Vec<Operation>> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of queues executed, including ones dropped from history.
    pub fn executed(&self) -> usize {
        self.executed
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY)
    }
}

impl Executor for Transcript {
    fn execute(&mut self, operations: Vec<Operation>) {
        tracing::trace!(?operations, "execute");
        if self.entries.len() == self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(operations);
        self.executed += 1;
    }
}

fn styled(operation: &Operation, colors: &ThemeColors) -> Span<'static> {
    let color = match operation {
        Operation::Motion { .. } => colors.motion,
        Operation::Operator { .. } => colors.operator,
        _ => colors.control,
    };
    Span::styled(operation.to_string(), Style::default().fg(color))
}

/// Renders the most recent queues, newest at the bottom.
pub fn render_transcript(f: &mut Frame, area: Rect, transcript: &Transcript, colors: &ThemeColors) {
    let visible = area.height as usize;
    let separator = Span::styled(" | ", Style::default().fg(colors.control));

    let mut lines: Vec<Line> = transcript
        .entries()
        .rev()
        .take(visible)
        .map(|queue| {
            let mut spans = Vec::new();
            for (i, operation) in queue.iter().filter(|op| !op.is_control()).enumerate() {
                if i > 0 {
                    spans.push(separator.clone());
                }
                spans.push(styled(operation, colors));
            }
            Line::from(spans)
        })
        .collect();
    lines.reverse();

    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(colors.background).fg(colors.foreground));
    f.render_widget(paragraph, area);
}
