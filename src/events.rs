//! Key chord mapping.
//!
//! Bindings map a chord (one or more key tokens, `"gg"`, `"<down>"`) to a
//! command string from the `:` grammar or to a mode switch. Multi-key chords
//! are resolved with a pending buffer: a prefix of a longer binding waits for
//! the next key, anything else resolves or clears immediately.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use once_cell::sync::Lazy;

use crate::commands::{self, Command, ParseOutcome};

/// What a resolved chord asks the app to do.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyAction {
    /// Run a command from the `:` grammar.
    Dispatch(Command),
    /// Open the `:` prompt.
    EnterCommandMode,
    /// Open the `/` prompt.
    EnterSearchMode,
    /// Show the help text.
    ShowHelp,
}

/// Result of feeding one key token into the chord buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum ChordResult {
    Action(KeyAction),
    /// The buffer is a prefix of some longer binding; waiting for more keys.
    Pending,
    Unbound,
}

static DEFAULT_BINDINGS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("j", "scroll_down"),
        ("k", "scroll_up"),
        ("<down>", "scroll_down"),
        ("<up>", "scroll_up"),
        ("<pagedown>", "page_down"),
        ("<pageup>", "page_up"),
        ("gg", "jump_to_top"),
        ("G", "jump_to_bottom"),
        ("<space>", "mark_selected"),
        ("s", "toggle_style"),
        ("e", "edit"),
        ("o", "open"),
        ("y", "copy_ref"),
        ("r", "reload"),
        ("q", "quit"),
        (":", "command_mode"),
        ("/", "search_mode"),
        ("?", "help"),
    ])
});

/// Chord-to-command bindings with a pending-prefix buffer.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<String, String>,
    pending: String,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::with_overrides(&HashMap::new())
    }
}

impl Keymap {
    /// Defaults plus configured overrides. An override bound to an empty
    /// string removes the default binding.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut bindings: HashMap<String, String> = DEFAULT_BINDINGS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        for (chord, command) in overrides {
            if command.is_empty() {
                bindings.remove(chord);
            } else {
                bindings.insert(chord.clone(), command.clone());
            }
        }
        Self {
            bindings,
            pending: String::new(),
        }
    }

    /// Keys currently buffered toward a multi-key chord.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Feed one key token; resolves, waits, or clears the buffer.
    pub fn push_token(&mut self, token: &str) -> ChordResult {
        self.pending.push_str(token);

        if let Some(command) = self.bindings.get(&self.pending) {
            let action = resolve_binding(command);
            self.pending.clear();
            return match action {
                Some(action) => ChordResult::Action(action),
                None => ChordResult::Unbound,
            };
        }

        let is_prefix = self
            .bindings
            .keys()
            .any(|chord| chord.starts_with(&self.pending) && chord != &self.pending);
        if is_prefix {
            ChordResult::Pending
        } else {
            self.pending.clear();
            ChordResult::Unbound
        }
    }

    /// Drop a partially entered chord (escape).
    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }
}

fn resolve_binding(command: &str) -> Option<KeyAction> {
    match command {
        "command_mode" => Some(KeyAction::EnterCommandMode),
        "search_mode" => Some(KeyAction::EnterSearchMode),
        "help" => Some(KeyAction::ShowHelp),
        other => match commands::parse(other) {
            ParseOutcome::Parsed(cmd) => Some(KeyAction::Dispatch(cmd)),
            _ => None,
        },
    }
}

/// Translate a terminal key event into a chord token.
///
/// Plain characters map to themselves, special keys to `<name>` tokens.
/// Events with control/alt modifiers or unmapped keys return `None`.
pub fn key_token(key: &KeyEvent) -> Option<String> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    match key.code {
        KeyCode::Char(' ') => Some("<space>".to_string()),
        KeyCode::Char(c) => Some(c.to_string()),
        KeyCode::Up => Some("<up>".to_string()),
        KeyCode::Down => Some("<down>".to_string()),
        KeyCode::PageUp => Some("<pageup>".to_string()),
        KeyCode::PageDown => Some("<pagedown>".to_string()),
        KeyCode::Home => Some("<home>".to_string()),
        KeyCode::End => Some("<end>".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_key_resolves() {
        let mut keymap = Keymap::default();
        assert_eq!(
            keymap.push_token("j"),
            ChordResult::Action(KeyAction::Dispatch(Command::ScrollDown))
        );
        assert_eq!(keymap.pending(), "");
    }

    #[test]
    fn test_multi_key_chord_waits_then_resolves() {
        let mut keymap = Keymap::default();
        assert_eq!(keymap.push_token("g"), ChordResult::Pending);
        assert_eq!(keymap.pending(), "g");
        assert_eq!(
            keymap.push_token("g"),
            ChordResult::Action(KeyAction::Dispatch(Command::JumpToTop))
        );
        assert_eq!(keymap.pending(), "");
    }

    #[test]
    fn test_broken_chord_clears_buffer() {
        let mut keymap = Keymap::default();
        keymap.push_token("g");
        assert_eq!(keymap.push_token("x"), ChordResult::Unbound);
        assert_eq!(keymap.pending(), "");
    }

    #[test]
    fn test_mode_switch_bindings() {
        let mut keymap = Keymap::default();
        assert_eq!(
            keymap.push_token(":"),
            ChordResult::Action(KeyAction::EnterCommandMode)
        );
        assert_eq!(
            keymap.push_token("/"),
            ChordResult::Action(KeyAction::EnterSearchMode)
        );
        assert_eq!(
            keymap.push_token("?"),
            ChordResult::Action(KeyAction::ShowHelp)
        );
    }

    #[test]
    fn test_override_replaces_default() {
        let overrides = HashMap::from([("q".to_string(), "view_reset".to_string())]);
        let mut keymap = Keymap::with_overrides(&overrides);
        assert_eq!(
            keymap.push_token("q"),
            ChordResult::Action(KeyAction::Dispatch(Command::ViewReset))
        );
    }

    #[test]
    fn test_override_with_arguments() {
        let overrides = HashMap::from([("S".to_string(), "sort year- author".to_string())]);
        let mut keymap = Keymap::with_overrides(&overrides);
        match keymap.push_token("S") {
            ChordResult::Action(KeyAction::Dispatch(Command::Sort { keys })) => {
                assert_eq!(keys.len(), 2);
            }
            other => panic!("expected sort dispatch, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_override_unbinds() {
        let overrides = HashMap::from([("q".to_string(), String::new())]);
        let mut keymap = Keymap::with_overrides(&overrides);
        assert_eq!(keymap.push_token("q"), ChordResult::Unbound);
    }

    #[test]
    fn test_key_token_translation() {
        let plain = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(key_token(&plain).as_deref(), Some("j"));

        let space = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        assert_eq!(key_token(&space).as_deref(), Some("<space>"));

        let shifted = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(key_token(&shifted).as_deref(), Some("G"));

        let ctrl = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_token(&ctrl), None);

        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(key_token(&down).as_deref(), Some("<down>"));
    }

    #[test]
    fn test_clear_pending() {
        let mut keymap = Keymap::default();
        keymap.push_token("g");
        keymap.clear_pending();
        assert_eq!(keymap.pending(), "");
        // "g" again starts a fresh chord rather than completing "gg".
        assert_eq!(keymap.push_token("g"), ChordResult::Pending);
    }
}
