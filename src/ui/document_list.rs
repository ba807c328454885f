//! Document list rendering: table and card styles.
//!
//! Both renderers are pure functions from the pull-based view state to lines;
//! all window arithmetic already happened in the model, so drawing is a
//! straight walk over [`RowEntry`] values.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::config::{DocumentListConfig, TableConfig};
use crate::format::{expand_template, fit_width};
use crate::view_state::{DisplayStyle, RowEntry};

use super::theme::{COLOR_ACCENT, COLOR_DIM, COLOR_MARK};

/// Render the visible window of the document list.
pub fn render_document_list(frame: &mut Frame, area: Rect, app: &App) {
    let config = &app.config.document_list;
    let rows = app.list.visible_rows();
    let lines = match app.list.style() {
        DisplayStyle::Table => table_lines(&rows, config),
        DisplayStyle::Card => card_lines(&rows, config),
    };
    frame.render_widget(Paragraph::new(lines), area);
}

fn selection_style(selected: bool) -> Style {
    if selected {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    }
}

fn mark_span(entry: &RowEntry<'_>, config: &DocumentListConfig) -> Span<'static> {
    let icon_width = config.marked_icon.chars().count().max(1);
    if entry.is_marked {
        Span::styled(
            fit_width(&config.marked_icon, icon_width + 1),
            Style::default().fg(COLOR_MARK),
        )
    } else {
        Span::raw(" ".repeat(icon_width + 1))
    }
}

fn table_lines<'a>(rows: &[RowEntry<'a>], config: &DocumentListConfig) -> Vec<Line<'static>> {
    let table = &config.table;
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(header_line(table, config));
    for entry in rows {
        let mut spans = vec![mark_span(entry, config)];
        let style = selection_style(entry.is_selected);
        for (i, column) in table.columns.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(
                    table.separator.clone(),
                    style.fg(COLOR_DIM),
                ));
            }
            let cell = expand_template(entry.document, &column.template);
            spans.push(Span::styled(
                fit_width(&cell, column.width as usize),
                style,
            ));
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn header_line(table: &TableConfig, config: &DocumentListConfig) -> Line<'static> {
    let icon_width = config.marked_icon.chars().count().max(1);
    let mut spans = vec![Span::raw(" ".repeat(icon_width + 1))];
    let style = Style::default()
        .fg(COLOR_ACCENT)
        .add_modifier(Modifier::BOLD);
    for (i, column) in table.columns.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(
                table.separator.clone(),
                Style::default().fg(COLOR_DIM),
            ));
        }
        spans.push(Span::styled(
            fit_width(&column.header, column.width as usize),
            style,
        ));
    }
    Line::from(spans)
}

fn card_lines<'a>(rows: &[RowEntry<'a>], config: &DocumentListConfig) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for entry in rows {
        let style = selection_style(entry.is_selected);
        for (i, template) in config.card_rows.iter().enumerate() {
            let text = expand_template(entry.document, template);
            let lead = if i == 0 {
                mark_span(entry, config)
            } else {
                Span::raw(" ".repeat(config.marked_icon.chars().count().max(1) + 1))
            };
            lines.push(Line::from(vec![lead, Span::styled(text, style)]));
        }
        // Blank separator between cards.
        lines.push(Line::default());
    }
    lines
}
