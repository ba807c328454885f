//! The `:`-prompt command language.
//!
//! Parsing returns a tagged outcome — `Parsed`, `Help`, or `ParseError` —
//! handled by the caller via matching; there is no exception-style control
//! flow for "help requested" versus "bad input". Dispatch results carry a
//! `{status, message, options}` shape the UI can render directly.

use std::fmt;

use crate::view_state::{parse_sort_keys, SortKey};

/// A single tag edit: add (`tag+` or bare `tag`) or remove (`tag-`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagChange {
    pub tag: String,
    pub add: bool,
}

/// Parse tag tokens (`rust+ legacy- new`) into tag changes.
pub fn parse_tag_changes(spec: &str) -> Vec<TagChange> {
    spec.split_whitespace()
        .filter_map(|token| {
            let (tag, add) = match token.strip_suffix('-') {
                Some(tag) => (tag, false),
                None => (token.strip_suffix('+').unwrap_or(token), true),
            };
            if tag.is_empty() {
                None
            } else {
                Some(TagChange {
                    tag: tag.to_string(),
                    add,
                })
            }
        })
        .collect()
}

/// A parsed user command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search { query: String },
    Sort { keys: Vec<SortKey> },
    Tag { changes: Vec<TagChange> },
    MarkSelected,
    MarkView,
    UnmarkAll,
    ViewMarked,
    ViewReset,
    ToggleStyle,
    ScrollDown,
    ScrollUp,
    PageUp,
    PageDown,
    JumpToTop,
    JumpToBottom,
    Reload,
    Open,
    Edit,
    /// Copy the reference keys of the marked or selected documents.
    CopyRef,
    Quit,
}

/// Outcome of parsing one prompt line.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    Parsed(Command),
    Help(String),
    ParseError(String),
}

/// Status of a dispatched command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Ok,
    /// The command needs further input (e.g. choosing among attachments).
    Prompt,
    Error,
}

/// Result of dispatching a command.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: Option<String>,
    pub options: Option<Vec<String>>,
}

impl CommandResult {
    pub fn ok() -> Self {
        Self {
            status: CommandStatus::Ok,
            message: None,
            options: None,
        }
    }

    pub fn ok_with(message: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Ok,
            message: Some(message.into()),
            options: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Error,
            message: Some(message.into()),
            options: None,
        }
    }

    pub fn prompt(message: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            status: CommandStatus::Prompt,
            message: Some(message.into()),
            options: Some(options),
        }
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandStatus::Ok => write!(f, "ok"),
            CommandStatus::Prompt => write!(f, "prompt"),
            CommandStatus::Error => write!(f, "error"),
        }
    }
}

const HELP_TEXT: &str = "\
Commands:
  search <query>        filter the view (field:value terms, free text)
  sort <key[+|-]> ...   sort by fields; trailing - sorts descending
  tag <tag[+|-]> ...    add/remove tags on marked or selected documents
  mark_selected         toggle mark on the selection
  mark_view             mark every document in the view
  unmark_all            clear all marks
  view_marked           narrow the view to marked documents
  view_reset            show all documents again
  toggle_style          switch between table and card layout
  scroll_down/up        move the selection one row
  page_down/up          move the selection one page
  jump_to_top/bottom    move to the first/last document
  open                  open attachments of marked or selected documents
  edit                  edit the selected document in $EDITOR
  copy_ref              copy marked or selected reference keys
  reload                reload the library
  quit                  exit";

/// Parse one prompt line.
pub fn parse(input: &str) -> ParseOutcome {
    let input = input.trim();
    if input.is_empty() {
        return ParseOutcome::ParseError("empty command".to_string());
    }
    let (name, rest) = match input.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (input, ""),
    };

    let bare = |cmd: Command| {
        if rest.is_empty() {
            ParseOutcome::Parsed(cmd)
        } else {
            ParseOutcome::ParseError(format!("'{}' takes no arguments", name))
        }
    };

    match name {
        "help" | "?" => ParseOutcome::Help(HELP_TEXT.to_string()),
        "search" => {
            if rest.is_empty() {
                ParseOutcome::ParseError("search requires a query".to_string())
            } else {
                ParseOutcome::Parsed(Command::Search {
                    query: rest.to_string(),
                })
            }
        }
        "sort" => {
            let keys = parse_sort_keys(rest);
            if keys.is_empty() {
                ParseOutcome::ParseError("sort requires at least one key".to_string())
            } else {
                ParseOutcome::Parsed(Command::Sort { keys })
            }
        }
        "tag" => {
            let changes = parse_tag_changes(rest);
            if changes.is_empty() {
                ParseOutcome::ParseError("tag requires at least one tag".to_string())
            } else {
                ParseOutcome::Parsed(Command::Tag { changes })
            }
        }
        "mark_selected" => bare(Command::MarkSelected),
        "mark_view" => bare(Command::MarkView),
        "unmark_all" => bare(Command::UnmarkAll),
        "view_marked" => bare(Command::ViewMarked),
        "view_reset" => bare(Command::ViewReset),
        "toggle_style" => bare(Command::ToggleStyle),
        "scroll_down" => bare(Command::ScrollDown),
        "scroll_up" => bare(Command::ScrollUp),
        "page_up" => bare(Command::PageUp),
        "page_down" => bare(Command::PageDown),
        "jump_to_top" => bare(Command::JumpToTop),
        "jump_to_bottom" => bare(Command::JumpToBottom),
        "reload" => bare(Command::Reload),
        "open" => bare(Command::Open),
        "edit" => bare(Command::Edit),
        "copy_ref" => bare(Command::CopyRef),
        "quit" | "q" => bare(Command::Quit),
        other => ParseOutcome::ParseError(format!("unknown command '{}'", other)),
    }
}
