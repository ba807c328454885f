//! Application configuration.
//!
//! One explicit, validated struct loaded at startup — no global lookup table.
//! The file lives at `<config_dir>/bibtui/config.json`; every field has a
//! default so a missing or partial file still yields a working setup.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{eyre, Result, WrapErr};
use serde::{Deserialize, Serialize};

use crate::view_state::DisplayStyle;

/// One table column: header text, a `{field}` template, and a cell width.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub header: String,
    pub template: String,
    pub width: u16,
}

/// Table presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub separator: String,
    pub columns: Vec<ColumnConfig>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            separator: " │ ".to_string(),
            columns: vec![
                ColumnConfig {
                    header: "Ref".to_string(),
                    template: "{ref}".to_string(),
                    width: 15,
                },
                ColumnConfig {
                    header: "Author".to_string(),
                    template: "{author}".to_string(),
                    width: 30,
                },
                ColumnConfig {
                    header: "Year".to_string(),
                    template: "{year}".to_string(),
                    width: 4,
                },
                ColumnConfig {
                    header: "Title".to_string(),
                    template: "{title}".to_string(),
                    width: 400,
                },
            ],
        }
    }
}

/// Document list presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentListConfig {
    /// Glyph shown in front of marked documents.
    pub marked_icon: String,
    pub default_style: DisplayStyle,
    /// Default sort spec ("year- author"); empty keeps repository order.
    pub default_sort: String,
    /// Field where tags are stored.
    pub tag_field: String,
    /// Card style row templates; the card height is this list's length.
    pub card_rows: Vec<String>,
    pub table: TableConfig,
}

impl Default for DocumentListConfig {
    fn default() -> Self {
        Self {
            marked_icon: "*".to_string(),
            default_style: DisplayStyle::Card,
            default_sort: String::new(),
            tag_field: "tags".to_string(),
            card_rows: vec![
                "{ref}".to_string(),
                "{title}".to_string(),
                "{author}".to_string(),
            ],
            table: TableConfig::default(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub document_list: DocumentListConfig,
    /// Query keyword aliases ("to-read" -> "tags:to-read").
    pub aliases: HashMap<String, String>,
    /// Key binding overrides, key chord -> command name.
    pub keymap: HashMap<String, String>,
}

impl Config {
    /// Default config file path, when a config directory exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("bibtui").join("config.json"))
    }

    /// Load from `path`, or from the default location when `path` is `None`.
    /// A missing file yields the defaults; a malformed file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => Self::default_path(),
        };
        let config = match path {
            Some(ref p) if p.exists() => {
                let text = fs::read_to_string(p)
                    .wrap_err_with(|| format!("reading config {}", p.display()))?;
                serde_json::from_str(&text)
                    .wrap_err_with(|| format!("parsing config {}", p.display()))?
            }
            _ => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate once at startup so later lookups never need fallbacks.
    pub fn validate(&self) -> Result<()> {
        let dl = &self.document_list;
        if dl.card_rows.is_empty() {
            return Err(eyre!("document_list.card_rows must not be empty"));
        }
        if dl.table.columns.is_empty() {
            return Err(eyre!("document_list.table.columns must not be empty"));
        }
        if let Some(col) = dl.table.columns.iter().find(|c| c.width == 0) {
            return Err(eyre!("table column '{}' has zero width", col.header));
        }
        if dl.tag_field.is_empty() {
            return Err(eyre!("document_list.tag_field must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.document_list.marked_icon, "*");
        assert_eq!(config.document_list.card_rows.len(), 3);
        assert_eq!(config.document_list.table.columns.len(), 4);
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let config = Config::load(Some(Path::new("/nonexistent/config.json"))).unwrap();
        assert_eq!(config.document_list.tag_field, "tags");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(
            &path,
            r#"{"document_list": {"marked_icon": ">", "default_style": "table"}}"#,
        )
        .unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.document_list.marked_icon, ">");
        assert_eq!(config.document_list.default_style, DisplayStyle::Table);
        // Untouched sections keep their defaults.
        assert_eq!(config.document_list.table.separator, " │ ");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = Config::default();
        config.document_list.card_rows.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.document_list.table.columns[0].width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(Config::load(Some(&path)).is_err());
    }
}
