//! Mode-sensitive key handling.
//!
//! Normal mode feeds chord tokens into the keymap; the command and search
//! modes are line editors over `App::prompt`; help mode dismisses on any key.

use crossterm::event::{KeyCode, KeyEvent};

use crate::commands::{self, Command, ParseOutcome};
use crate::events::{key_token, ChordResult, KeyAction};

use super::{App, MessageKind, Mode};

impl App {
    /// Route one key press according to the current mode.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::Normal => self.handle_normal_key(key),
            Mode::Command | Mode::Search => self.handle_prompt_key(key),
            Mode::Help(_) => {
                self.mode = Mode::Normal;
                self.request_redraw();
            }
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.keymap.clear_pending();
            self.clear_message();
            self.request_redraw();
            return;
        }
        let Some(token) = key_token(&key) else {
            return;
        };
        match self.keymap.push_token(&token) {
            ChordResult::Action(action) => self.run_action(action),
            // Redraw so the pending chord shows in the status bar.
            ChordResult::Pending => self.request_redraw(),
            ChordResult::Unbound => {}
        }
    }

    fn run_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Dispatch(command) => {
                let result = self.dispatch(command);
                self.report(result);
            }
            KeyAction::EnterCommandMode => self.enter_prompt(Mode::Command),
            KeyAction::EnterSearchMode => self.enter_prompt(Mode::Search),
            KeyAction::ShowHelp => self.show_help(),
        }
    }

    fn enter_prompt(&mut self, mode: Mode) {
        self.mode = mode;
        self.prompt.clear();
        self.clear_message();
        self.request_redraw();
    }

    fn show_help(&mut self) {
        if let ParseOutcome::Help(text) = commands::parse("help") {
            self.mode = Mode::Help(text);
            self.request_redraw();
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.mode = Mode::Normal;
                self.prompt.clear();
                self.request_redraw();
            }
            KeyCode::Backspace => {
                self.prompt.pop();
                self.request_redraw();
            }
            KeyCode::Enter => self.submit_prompt(),
            KeyCode::Char(c) => {
                self.prompt.push(c);
                self.request_redraw();
            }
            _ => {}
        }
    }

    fn submit_prompt(&mut self) {
        let line = std::mem::take(&mut self.prompt);
        let submitted = std::mem::replace(&mut self.mode, Mode::Normal);
        self.request_redraw();
        if line.trim().is_empty() {
            return;
        }
        match submitted {
            Mode::Search => {
                let result = self.dispatch(Command::Search { query: line });
                self.report(result);
            }
            Mode::Command => match commands::parse(&line) {
                ParseOutcome::Parsed(command) => {
                    let result = self.dispatch(command);
                    self.report(result);
                }
                ParseOutcome::Help(text) => {
                    self.mode = Mode::Help(text);
                }
                ParseOutcome::ParseError(msg) => {
                    self.set_message(msg, MessageKind::Error);
                }
            },
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::test_app;
    use super::*;
    use crate::models::Document;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_line(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn library() -> Vec<Document> {
        vec![
            Document::new("a").with_field("author", "Aho"),
            Document::new("b").with_field("author", "Knuth"),
            Document::new("c").with_field("author", "Knuth"),
        ]
    }

    #[test]
    fn test_normal_mode_scroll_key() {
        let mut app = test_app(library());
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.list.selected_index(), 1);
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.list.selected_index(), 0);
    }

    #[test]
    fn test_multi_key_chord_gg() {
        let mut app = test_app(library());
        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.list.selected_index(), 2);
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.keymap.pending(), "g");
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.list.selected_index(), 0);
        assert_eq!(app.keymap.pending(), "");
    }

    #[test]
    fn test_escape_cancels_pending_chord() {
        let mut app = test_app(library());
        press(&mut app, KeyCode::Char('g'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.keymap.pending(), "");
    }

    #[test]
    fn test_colon_enters_command_mode_and_runs_command() {
        let mut app = test_app(library());
        press(&mut app, KeyCode::Char(':'));
        assert_eq!(app.mode, Mode::Command);
        type_line(&mut app, "jump_to_bottom");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.list.selected_index(), 2);
    }

    #[test]
    fn test_slash_enters_search_mode_and_filters() {
        let mut app = test_app(library());
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.mode, Mode::Search);
        type_line(&mut app, "author:knuth");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.list.view_len(), 2);
    }

    #[test]
    fn test_prompt_backspace_edits() {
        let mut app = test_app(library());
        press(&mut app, KeyCode::Char(':'));
        type_line(&mut app, "qx");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.prompt, "q");
        press(&mut app, KeyCode::Enter);
        assert!(app.should_quit);
    }

    #[test]
    fn test_prompt_escape_cancels() {
        let mut app = test_app(library());
        press(&mut app, KeyCode::Char('/'));
        type_line(&mut app, "knuth");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.prompt, "");
        assert_eq!(app.list.view_len(), 3, "no search ran");
    }

    #[test]
    fn test_empty_prompt_submit_is_noop() {
        let mut app = test_app(library());
        press(&mut app, KeyCode::Char(':'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.message.is_none());
    }

    #[test]
    fn test_parse_error_shows_message() {
        let mut app = test_app(library());
        press(&mut app, KeyCode::Char(':'));
        type_line(&mut app, "frobnicate");
        press(&mut app, KeyCode::Enter);
        let (msg, kind) = app.message.clone().unwrap();
        assert_eq!(kind, MessageKind::Error);
        assert!(msg.contains("frobnicate"));
    }

    #[test]
    fn test_help_key_opens_and_any_key_closes() {
        let mut app = test_app(library());
        press(&mut app, KeyCode::Char('?'));
        assert!(matches!(app.mode, Mode::Help(_)));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.mode, Mode::Normal);
        // The dismissing key is consumed, not dispatched.
        assert_eq!(app.list.selected_index(), 0);
    }

    #[test]
    fn test_help_command_from_prompt() {
        let mut app = test_app(library());
        press(&mut app, KeyCode::Char(':'));
        type_line(&mut app, "help");
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.mode, Mode::Help(_)));
    }

    #[test]
    fn test_failed_search_leaves_view_and_reports() {
        let mut app = test_app(library());
        press(&mut app, KeyCode::Char('/'));
        type_line(&mut app, "author:missing");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.list.view_len(), 3);
        let (_, kind) = app.message.clone().unwrap();
        assert_eq!(kind, MessageKind::Error);
    }
}
