//! Application state and wiring.
//!
//! `App` owns the document list, the repository handle, the keymap, and the
//! prompt/message state. Input handling lives in `input`, command dispatch in
//! `dispatch`; both are method impls on `App`. The event loop in `main` only
//! feeds events in and redraws when a mutation reports a change.

mod dispatch;
mod input;

use std::path::PathBuf;

use color_eyre::Result;

use crate::config::Config;
use crate::events::Keymap;
use crate::query::AliasTable;
use crate::repository::DocumentRepository;
use crate::view_state::{parse_sort_keys, DocumentList};

/// Input mode of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Keys are chords against the document list.
    Normal,
    /// Typing into the `:` prompt.
    Command,
    /// Typing into the `/` prompt.
    Search,
    /// Help text is displayed; any key returns to normal.
    Help(String),
}

/// Message bar severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
}

/// Top-level application state.
pub struct App {
    pub config: Config,
    repo: Box<dyn DocumentRepository>,
    pub list: DocumentList,
    pub keymap: Keymap,
    aliases: AliasTable,
    pub mode: Mode,
    /// Text being typed into the command or search prompt.
    pub prompt: String,
    /// One-line advisory shown under the list.
    pub message: Option<(String, MessageKind)>,
    pub should_quit: bool,
    needs_redraw: bool,
    /// Library directory backing `edit`, when the repository is file-based.
    library_dir: Option<PathBuf>,
    /// Set by the `edit` command; the event loop suspends the TUI and runs
    /// the editor on it.
    pub pending_edit: Option<PathBuf>,
}

impl App {
    /// Build the session: load the library, apply the configured default
    /// sort, and size the list for `viewport_height` terminal rows.
    pub fn new(
        config: Config,
        repo: Box<dyn DocumentRepository>,
        library_dir: Option<PathBuf>,
        viewport_height: u16,
    ) -> Result<Self> {
        let items = repo.list_all()?;
        let dl = &config.document_list;
        let list = DocumentList::new(
            items,
            parse_sort_keys(&dl.default_sort),
            dl.default_style,
            list_height(viewport_height),
            dl.card_rows.len(),
            repo.as_ref(),
        );
        let keymap = Keymap::with_overrides(&config.keymap);
        let aliases = AliasTable::new(config.aliases.clone());
        Ok(Self {
            config,
            repo,
            list,
            keymap,
            aliases,
            mode: Mode::Normal,
            prompt: String::new(),
            message: None,
            should_quit: false,
            needs_redraw: true,
            library_dir,
            pending_edit: None,
        })
    }

    /// Take and clear the redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Reflow the list for a new terminal height.
    pub fn handle_resize(&mut self, height: u16) {
        self.list.resize(list_height(height));
        self.needs_redraw = true;
    }

    /// Complete a suspended `edit`: reload the library and surface the
    /// outcome. Called by the event loop after the external editor exits.
    pub fn finish_edit(&mut self, result: Result<()>) {
        match result {
            Ok(()) => {
                let reload = self.dispatch(crate::commands::Command::Reload);
                self.report(reload);
            }
            Err(err) => self.set_message(format!("edit failed: {}", err), MessageKind::Error),
        }
        self.needs_redraw = true;
    }

    pub(crate) fn set_message(&mut self, text: impl Into<String>, kind: MessageKind) {
        self.message = Some((text.into(), kind));
        self.needs_redraw = true;
    }

    pub(crate) fn clear_message(&mut self) {
        if self.message.take().is_some() {
            self.needs_redraw = true;
        }
    }

    pub(crate) fn repo(&self) -> &dyn DocumentRepository {
        self.repo.as_ref()
    }

    pub(crate) fn repo_mut(&mut self) -> &mut dyn DocumentRepository {
        self.repo.as_mut()
    }

    pub(crate) fn library_dir(&self) -> Option<&PathBuf> {
        self.library_dir.as_ref()
    }
}

/// Rows available to the document list: the status bar and the
/// message/prompt line each take one.
fn list_height(terminal_height: u16) -> u16 {
    terminal_height.saturating_sub(2)
}
