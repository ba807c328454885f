//! External actions: editor, file opener, clipboard.
//!
//! Fire-and-forget collaborators. The editor intentionally blocks the whole
//! session until it exits — the terminal has to be relinquished while a
//! full-screen program runs — while file opening and clipboard writes return
//! immediately.

use std::path::Path;
use std::process::Command;

use color_eyre::eyre::{eyre, Result, WrapErr};
use tracing::info;

/// Open every attachment path with the platform handler.
///
/// Returns the number of files handed off.
pub fn open_files(paths: &[String]) -> Result<usize> {
    for path in paths {
        open::that_detached(path).wrap_err_with(|| format!("opening {}", path))?;
        info!(path, "opened attachment");
    }
    Ok(paths.len())
}

/// Run `$EDITOR` (falling back to `vi`) on a file, blocking until it exits.
///
/// The caller must have left the TUI screen before calling this and
/// re-enters it afterwards.
pub fn edit_file(path: &Path) -> Result<()> {
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    info!(editor, path = %path.display(), "launching editor");
    let status = Command::new(&editor)
        .arg(path)
        .status()
        .wrap_err_with(|| format!("launching editor '{}'", editor))?;
    if !status.success() {
        return Err(eyre!("editor '{}' exited with {}", editor, status));
    }
    Ok(())
}

/// Put text on the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| eyre!("clipboard unavailable: {}", e))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| eyre!("clipboard write failed: {}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_files_empty_is_ok() {
        assert_eq!(open_files(&[]).unwrap(), 0);
    }

    #[test]
    fn test_edit_file_missing_editor_fails() {
        // Point EDITOR at a binary that cannot exist.
        let prev = std::env::var("EDITOR").ok();
        std::env::set_var("EDITOR", "/nonexistent/editor-binary");
        let result = edit_file(Path::new("/tmp/whatever"));
        match prev {
            Some(v) => std::env::set_var("EDITOR", v),
            None => std::env::remove_var("EDITOR"),
        }
        assert!(result.is_err());
    }
}
