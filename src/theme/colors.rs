//! Color definitions for modalkeys themes.

use ratatui::style::Color;

/// Defines all colors used by the demo interface.
///
/// Colors are organized into two groups:
/// - **UI colors**: background, foreground and the status line
/// - **Semantic colors**: messages and descriptor categories in the transcript
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // UI colors
    /// Main background color.
    pub background: Color,
    /// Main foreground/text color.
    pub foreground: Color,
    /// Background color for the status line.
    pub status_line_bg: Color,
    /// Foreground/text color for the status line.
    pub status_line_fg: Color,

    // Semantic colors
    /// Color for rejected sequences.
    pub error: Color,
    /// Color for warnings.
    pub warning: Color,
    /// Color for informational messages and pending keys.
    pub info: Color,
    /// Color for operator descriptors.
    pub operator: Color,
    /// Color for motion descriptors.
    pub motion: Color,
    /// Color for mode changes and control signals.
    pub control: Color,
}

impl ThemeColors {
    /// Colors for dark terminals.
    pub fn default_dark() -> Self {
        Self {
            background: Color::Reset,
            foreground: Color::White,
            status_line_bg: Color::DarkGray,
            status_line_fg: Color::White,
            error: Color::Red,
            warning: Color::Yellow,
            info: Color::Cyan,
            operator: Color::Magenta,
            motion: Color::Green,
            control: Color::Gray,
        }
    }

    /// Colors for light terminals.
    pub fn default_light() -> Self {
        Self {
            background: Color::Reset,
            foreground: Color::Black,
            status_line_bg: Color::Gray,
            status_line_fg: Color::Black,
            error: Color::Red,
            warning: Color::Rgb(0xb5, 0x89, 0x00),
            info: Color::Blue,
            operator: Color::Magenta,
            motion: Color::Rgb(0x00, 0x80, 0x00),
            control: Color::DarkGray,
        }
    }
}
