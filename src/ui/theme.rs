//! Color constants for the document browser.
//!
//! Minimal dark palette; selection uses reverse video so it works on any
//! terminal background.

use ratatui::style::Color;

/// Dim text for separators and secondary info.
pub const COLOR_DIM: Color = Color::DarkGray;

/// Primary text highlights (table header, status counts).
pub const COLOR_ACCENT: Color = Color::White;

/// Mark glyph in front of marked documents.
pub const COLOR_MARK: Color = Color::Yellow;

/// Error text in the message bar.
pub const COLOR_ERROR: Color = Color::Red;

/// Informational text in the message bar.
pub const COLOR_INFO: Color = Color::Green;
