//! UI module for the modalkeys interactive demo.
//!
//! This module renders a transcript of executed descriptor queues together
//! with the status line and message area.

pub mod message_area;
pub mod status_line;
pub mod transcript;

use anyhow::Result;
use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Terminal;

use crate::mode::ModeDispatcher;
use crate::theme::Theme;
use message_area::Message;
use status_line::StatusLine;
use transcript::Transcript;

/// Dispatcher wired to the demo's own executor and status display.
pub type Session = ModeDispatcher<Transcript, StatusLine>;

/// Main UI structure that manages the terminal interface rendering.
///
/// The UI is composed of three areas:
/// - Transcript (top): executed descriptor queues, newest last
/// - Status line (middle): mode indicator and pending keys
/// - Message area (bottom): the last rejected sequence, if any
pub struct UI {
    theme: Theme,
}

impl UI {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Returns the current theme name.
    pub fn theme_name(&self) -> &str {
        &self.theme.name
    }

    /// Renders the UI to the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal drawing fails.
    pub fn render<B: Backend>(
        &self,
        terminal: &mut Terminal<B>,
        session: &Session,
        message: Option<&Message>,
    ) -> Result<()> {
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(1),    // Transcript
                    Constraint::Length(1), // Status line
                    Constraint::Length(1), // Message area
                ])
                .split(f.area());

            transcript::render_transcript(f, chunks[0], session.executor(), &self.theme.colors);
            status_line::render_status_line(
                f,
                chunks[1],
                session.status(),
                session.pending_keys(),
                &self.theme.colors,
            );
            message_area::render_message_area(f, chunks[2], message, &self.theme.colors);
        })?;

        Ok(())
    }
}
