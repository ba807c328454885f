//! Status bar: selection position, counts, sort spec, pending chord.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

use super::theme::{COLOR_ACCENT, COLOR_DIM, COLOR_MARK};

/// Render the one-line status bar under the list.
pub fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    frame.render_widget(Paragraph::new(status_line(app)), area);
}

fn status_line(app: &App) -> Line<'static> {
    let info = app.list.status_info();
    let mut spans = vec![Span::styled(
        format!("{}/{}", info.selected_ordinal, info.view_count),
        Style::default()
            .fg(COLOR_ACCENT)
            .add_modifier(Modifier::BOLD),
    )];
    if info.view_count != info.item_count {
        spans.push(Span::styled(
            format!(" of {}", info.item_count),
            Style::default().fg(COLOR_DIM),
        ));
    }
    if info.marked_count > 0 {
        spans.push(Span::styled(
            format!("  marked {}", info.marked_count),
            Style::default().fg(COLOR_MARK),
        ));
    }
    if !info.sort_keys.is_empty() {
        spans.push(Span::styled(
            format!("  sort: {}", info.sort_keys),
            Style::default().fg(COLOR_DIM),
        ));
    }
    let pending = app.keymap.pending();
    if !pending.is_empty() {
        spans.push(Span::styled(
            format!("  {}", pending),
            Style::default().fg(COLOR_ACCENT),
        ));
    }
    Line::from(spans)
}
