//! Bottom line: command/search prompt or the message bar.

use ratatui::{
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, MessageKind, Mode};

use super::theme::{COLOR_ERROR, COLOR_INFO};

/// Render the prompt when one is open, the latest message otherwise.
pub fn render_prompt_line(frame: &mut Frame, area: Rect, app: &App) {
    if let Some(prefix) = prompt_prefix(&app.mode) {
        let text = format!("{}{}", prefix, app.prompt);
        let cursor_x = area.x + cursor_column(&text);
        frame.render_widget(Paragraph::new(text), area);
        frame.set_cursor_position(Position::new(
            cursor_x.min(area.right().saturating_sub(1)),
            area.y,
        ));
        return;
    }
    if let Some((text, kind)) = &app.message {
        let color = match kind {
            MessageKind::Error => COLOR_ERROR,
            MessageKind::Info => COLOR_INFO,
        };
        let line = Line::from(Span::styled(text.clone(), Style::default().fg(color)));
        frame.render_widget(Paragraph::new(line), area);
    }
}

fn prompt_prefix(mode: &Mode) -> Option<char> {
    match mode {
        Mode::Command => Some(':'),
        Mode::Search => Some('/'),
        Mode::Normal | Mode::Help(_) => None,
    }
}

/// Cursor offset after `text`, in display cells rather than chars so wide
/// glyphs keep the cursor at the end of the typed text.
fn cursor_column(text: &str) -> u16 {
    text.width() as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_prefix_per_mode() {
        assert_eq!(prompt_prefix(&Mode::Command), Some(':'));
        assert_eq!(prompt_prefix(&Mode::Search), Some('/'));
        assert_eq!(prompt_prefix(&Mode::Normal), None);
        assert_eq!(prompt_prefix(&Mode::Help(String::new())), None);
    }

    #[test]
    fn test_cursor_column_counts_display_cells() {
        assert_eq!(cursor_column("/abc"), 4);
        // CJK glyphs occupy two cells each; chars().count() would say 3.
        assert_eq!(cursor_column("/漢字"), 5);
    }
}
