//! UI rendering for the document browser.
//!
//! Three stacked regions: the document list, a one-line status bar, and the
//! prompt/message line. Help replaces the list region until dismissed. All
//! drawing pulls from `App`; nothing here mutates state.

mod document_list;
mod prompt;
mod status_bar;
mod theme;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Mode};

use document_list::render_document_list;
use prompt::render_prompt_line;
use status_bar::render_status_bar;
use theme::COLOR_DIM;

/// Render one frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Document list (or help text)
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Prompt / message line
        ])
        .split(frame.area());

    match &app.mode {
        Mode::Help(text) => {
            frame.render_widget(Paragraph::new(text.clone()), chunks[0]);
            frame.render_widget(
                Paragraph::new("press any key to return").style(Style::default().fg(COLOR_DIM)),
                chunks[1],
            );
        }
        _ => {
            render_document_list(frame, chunks[0], app);
            render_status_bar(frame, chunks[1], app);
        }
    }
    render_prompt_line(frame, chunks[2], app);
}
