//! Mapping from terminal key events to canonical key tokens.

use termion::event::{Event, Key};

/// Converts a termion Event into the canonical key token the dispatcher expects.
///
/// Printable characters map to themselves. Named keys use lowercase names
/// (`"esc"`, `"enter"`, `"backspace"`), and modified keys are written as
/// `"ctrl+x"` / `"alt+x"`.
///
/// # Returns
///
/// The key token, or None for events that are not key presses
///
/// # Example
///
/// ```
/// use termion::event::{Event, Key};
/// use modalkeys::input::keys::key_token;
///
/// assert_eq!(key_token(&Event::Key(Key::Char('d'))).as_deref(), Some("d"));
/// assert_eq!(key_token(&Event::Key(Key::Esc)).as_deref(), Some("esc"));
/// ```
pub fn key_token(event: &Event) -> Option<String> {
    let key = match event {
        Event::Key(k) => k,
        _ => return None,
    };

    let token = match key {
        Key::Char('\n') => "enter".to_string(),
        Key::Char('\t') => "tab".to_string(),
        Key::Char(' ') => "space".to_string(),
        Key::Char(c) => c.to_string(),
        Key::Ctrl(c) => format!("ctrl+{}", c),
        Key::Alt(c) => format!("alt+{}", c),
        Key::Esc => "esc".to_string(),
        Key::Backspace => "backspace".to_string(),
        Key::Delete => "delete".to_string(),
        Key::Left => "left".to_string(),
        Key::Right => "right".to_string(),
        Key::Up => "up".to_string(),
        Key::Down => "down".to_string(),
        Key::Home => "home".to_string(),
        Key::End => "end".to_string(),
        Key::PageUp => "pageup".to_string(),
        Key::PageDown => "pagedown".to_string(),
        Key::BackTab => "shift+tab".to_string(),
        Key::Insert => "insert".to_string(),
        Key::F(n) => format!("f{}", n),
        _ => return None,
    };

    Some(token)
}

/// Returns true for the keys that leave a mode (`esc` and its `ctrl+[` alias).
pub fn is_escape(key: &str) -> bool {
    key == "esc" || key == "ctrl+["
}
