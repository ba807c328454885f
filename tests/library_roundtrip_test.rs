//! Library-on-disk integration tests.
//!
//! Exercise the JSON library repository through the app: loading, tagging
//! with persistence, and reload picking up out-of-band changes.

use std::fs;
use std::path::Path;

use bibtui::app::App;
use bibtui::commands::Command;
use bibtui::config::Config;
use bibtui::repository::{DocumentRepository, LibraryRepository};

use tempfile::TempDir;

fn write_doc(dir: &Path, reference: &str, body: &str) {
    fs::write(dir.join(format!("{}.json", reference)), body).unwrap();
}

fn seed_library() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_doc(
        tmp.path(),
        "aho1986dragon",
        r#"{"ref": "aho1986dragon", "author": "Aho", "year": 1986}"#,
    );
    write_doc(
        tmp.path(),
        "knuth1997art",
        r#"{"ref": "knuth1997art", "author": "Knuth", "year": 1997}"#,
    );
    tmp
}

fn open_session(tmp: &TempDir) -> App {
    let repo = LibraryRepository::open(tmp.path()).unwrap();
    App::new(
        Config::default(),
        Box::new(repo),
        Some(tmp.path().to_path_buf()),
        20,
    )
    .unwrap()
}

#[test]
fn test_startup_loads_library() {
    let tmp = seed_library();
    let app = open_session(&tmp);
    assert_eq!(app.list.item_len(), 2);
    assert_eq!(
        app.list.selected_document().unwrap().reference,
        "aho1986dragon"
    );
}

#[test]
fn test_tag_writes_through_to_disk() {
    let tmp = seed_library();
    let mut app = open_session(&tmp);
    app.dispatch(Command::Tag {
        changes: bibtui::commands::parse_tag_changes("compilers+"),
    });

    // The change must be visible to a completely fresh repository.
    let fresh = LibraryRepository::open(tmp.path()).unwrap();
    let doc = fresh
        .list_all()
        .unwrap()
        .into_iter()
        .find(|d| d.reference == "aho1986dragon")
        .unwrap();
    assert_eq!(doc.tags("tags"), vec!["compilers".to_string()]);
}

#[test]
fn test_reload_picks_up_new_documents() {
    let tmp = seed_library();
    let mut app = open_session(&tmp);
    assert_eq!(app.list.item_len(), 2);

    write_doc(
        tmp.path(),
        "sipser2012intro",
        r#"{"ref": "sipser2012intro", "author": "Sipser", "year": 2012}"#,
    );
    let result = app.dispatch(Command::Reload);
    assert_eq!(result.message.as_deref(), Some("loaded 3 documents"));
    assert_eq!(app.list.item_len(), 3);
}

#[test]
fn test_reload_after_field_change_resorts() {
    let tmp = seed_library();
    let mut app = open_session(&tmp);
    app.dispatch(Command::Sort {
        keys: bibtui::view_state::parse_sort_keys("year"),
    });
    assert_eq!(
        app.list.selected_document().unwrap().reference,
        "aho1986dragon"
    );

    // Push the dragon book past Knuth and reload.
    write_doc(
        tmp.path(),
        "aho1986dragon",
        r#"{"ref": "aho1986dragon", "author": "Aho", "year": 2006}"#,
    );
    app.dispatch(Command::Reload);
    assert_eq!(
        app.list.selected_document().unwrap().reference,
        "knuth1997art"
    );
}

#[test]
fn test_edit_command_targets_backing_file() {
    let tmp = seed_library();
    let mut app = open_session(&tmp);
    app.dispatch(Command::Edit);
    let path = app.pending_edit.take().unwrap();
    assert_eq!(path, tmp.path().join("aho1986dragon.json"));
    assert!(path.exists());
}

#[test]
fn test_sort_key_validation_uses_library_fields() {
    let tmp = seed_library();
    let mut app = open_session(&tmp);
    let ok = app.dispatch(Command::Sort {
        keys: bibtui::view_state::parse_sort_keys("author"),
    });
    assert_eq!(ok.status, bibtui::commands::CommandStatus::Ok);

    let bad = app.dispatch(Command::Sort {
        keys: bibtui::view_state::parse_sort_keys("publisher"),
    });
    assert_eq!(bad.status, bibtui::commands::CommandStatus::Error);
}
