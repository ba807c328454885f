//! Command dispatch.
//!
//! Every parsed [`Command`] funnels through [`App::dispatch`], which mutates
//! the view state (or the repository) and reports back a `CommandResult` the
//! input layer turns into the message bar. View-state failures roll the model
//! back, so an error result always leaves the list exactly as it was.

use tracing::{info, warn};

use crate::commands::{Command, CommandResult, TagChange};
use crate::error::ViewError;
use crate::external;
use crate::models::Document;

use super::{App, MessageKind};

impl App {
    /// Execute one command against the session.
    pub fn dispatch(&mut self, command: Command) -> CommandResult {
        self.request_redraw();
        match command {
            Command::Search { query } => self.run_search(&query),
            Command::Sort { keys } => match self.list.set_sort(keys, self.repo.as_ref()) {
                Ok(_) => CommandResult::ok(),
                Err(err) => CommandResult::error(err.user_message()),
            },
            Command::Tag { changes } => self.run_tag(&changes),
            Command::MarkSelected => view_result(self.list.mark_selected()),
            Command::MarkView => {
                self.list.mark_view();
                CommandResult::ok()
            }
            Command::UnmarkAll => {
                self.list.unmark_all();
                CommandResult::ok()
            }
            Command::ViewMarked => view_result(self.list.view_marked()),
            Command::ViewReset => {
                self.list.view_reset();
                CommandResult::ok()
            }
            Command::ToggleStyle => {
                self.list.toggle_style();
                CommandResult::ok()
            }
            Command::ScrollDown => {
                self.list.scroll_down();
                CommandResult::ok()
            }
            Command::ScrollUp => {
                self.list.scroll_up();
                CommandResult::ok()
            }
            Command::PageDown => {
                self.list.page_down();
                CommandResult::ok()
            }
            Command::PageUp => {
                self.list.page_up();
                CommandResult::ok()
            }
            Command::JumpToTop => {
                self.list.jump_top();
                CommandResult::ok()
            }
            Command::JumpToBottom => {
                self.list.jump_bottom();
                CommandResult::ok()
            }
            Command::Reload => self.run_reload(),
            Command::Open => self.run_open(),
            Command::Edit => self.run_edit(),
            Command::CopyRef => self.run_copy_ref(),
            Command::Quit => {
                self.should_quit = true;
                CommandResult::ok()
            }
        }
    }

    fn run_search(&mut self, query: &str) -> CommandResult {
        let rewritten = self.aliases.rewrite(query);
        match self.list.search(&rewritten, self.repo.as_ref()) {
            Ok(_) => CommandResult::ok(),
            Err(err) => CommandResult::error(err.user_message()),
        }
    }

    fn run_tag(&mut self, changes: &[TagChange]) -> CommandResult {
        let targets = match self.list.marked_or_selected() {
            Ok(targets) => targets,
            Err(err) => return CommandResult::error(err.user_message()),
        };
        let tag_field = self.config.document_list.tag_field.clone();
        let mut saved = 0usize;
        for mut doc in targets {
            apply_tag_changes(&mut doc, &tag_field, changes);
            if let Err(err) = self.repo.save(&doc) {
                warn!(reference = %doc.reference, %err, "tag save failed");
                return CommandResult::error(format!(
                    "failed to save '{}': {}",
                    doc.reference, err
                ));
            }
            saved += 1;
        }
        // Re-read so the view reflects what was actually persisted.
        match self.repo.list_all() {
            Ok(items) => {
                self.list.set_items(items, self.repo.as_ref());
            }
            Err(err) => return CommandResult::error(format!("reload after tag failed: {}", err)),
        }
        info!(saved, "tags updated");
        CommandResult::ok_with(format!("tagged {} document(s)", saved))
    }

    fn run_reload(&mut self) -> CommandResult {
        match self.repo.list_all() {
            Ok(items) => {
                let count = items.len();
                self.list.set_items(items, self.repo.as_ref());
                CommandResult::ok_with(format!("loaded {} documents", count))
            }
            Err(err) => CommandResult::error(format!("reload failed: {}", err)),
        }
    }

    fn run_open(&mut self) -> CommandResult {
        let targets = match self.list.marked_or_selected() {
            Ok(targets) => targets,
            Err(err) => return CommandResult::error(err.user_message()),
        };
        let paths: Vec<String> = targets.iter().flat_map(Document::files).collect();
        if paths.is_empty() {
            return CommandResult::error("no attached files");
        }
        match external::open_files(&paths) {
            Ok(count) => CommandResult::ok_with(format!("opened {} file(s)", count)),
            Err(err) => CommandResult::error(format!("open failed: {}", err)),
        }
    }

    fn run_copy_ref(&mut self) -> CommandResult {
        let targets = match self.list.marked_or_selected() {
            Ok(targets) => targets,
            Err(err) => return CommandResult::error(err.user_message()),
        };
        let refs: Vec<String> = targets.iter().map(|d| d.reference.clone()).collect();
        match external::copy_to_clipboard(&refs.join(" ")) {
            Ok(()) => CommandResult::ok_with(format!("copied {} reference(s)", refs.len())),
            Err(err) => CommandResult::error(format!("copy failed: {}", err)),
        }
    }

    /// `edit` only records the target; the event loop owns the terminal and
    /// must suspend the TUI before the editor runs.
    fn run_edit(&mut self) -> CommandResult {
        let reference = match self.list.selected_document() {
            Ok(doc) => doc.reference.clone(),
            Err(err) => return CommandResult::error(err.user_message()),
        };
        match self.library_dir() {
            Some(dir) => {
                self.pending_edit = Some(dir.join(format!("{}.json", reference)));
                CommandResult::ok()
            }
            None => CommandResult::error("no library directory to edit in"),
        }
    }

    /// Apply a dispatch result to the message bar.
    pub(crate) fn report(&mut self, result: CommandResult) {
        match (&result.message, result.status) {
            (Some(msg), crate::commands::CommandStatus::Error) => {
                self.set_message(msg.clone(), MessageKind::Error);
            }
            (Some(msg), _) => {
                self.set_message(msg.clone(), MessageKind::Info);
            }
            (None, _) => self.clear_message(),
        }
    }
}

fn view_result(result: Result<bool, ViewError>) -> CommandResult {
    match result {
        Ok(_) => CommandResult::ok(),
        Err(err) => CommandResult::error(err.user_message()),
    }
}

fn apply_tag_changes(doc: &mut Document, tag_field: &str, changes: &[TagChange]) {
    let mut tags = doc.tags(tag_field);
    for change in changes {
        if change.add {
            if !tags.contains(&change.tag) {
                tags.push(change.tag.clone());
            }
        } else {
            tags.retain(|t| t != &change.tag);
        }
    }
    doc.set_tags(tag_field, tags);
}
