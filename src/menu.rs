//! Named option packages loaded from a JSON menu file.
//!
//! ```json
//! {
//!   "hex2": { "title": "2-digit hex multiplication", "args": "-x -l 2" },
//!   "sub8": { "title": "Octal subtraction", "args": "-b 8 -o - -l 3" }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MENU_FILE: &str = "drill_menu.json";

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("menu file {} not found", .0.display())]
    NotFound(PathBuf),
    #[error("cannot read menu file {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("invalid menu file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("No such menu item {item} found in {file}, ignoring")]
    NoSuchItem { item: String, file: String },
    #[error("menu item {item} has invalid args: {message}")]
    BadArgs { item: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub title: String,
    pub args: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Menu {
    source: String,
    items: BTreeMap<String, MenuItem>,
}

impl Menu {
    /// Parse menu JSON; `source` names the file in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::Parse`] for malformed JSON or missing fields.
    pub fn from_json(json: &str, source: &Path) -> Result<Self, MenuError> {
        let items: BTreeMap<String, MenuItem> =
            serde_json::from_str(json).map_err(|source_err| MenuError::Parse {
                path: source.to_path_buf(),
                source: source_err,
            })?;
        Ok(Menu {
            source: source.display().to_string(),
            items,
        })
    }

    /// Load `file_name` from the working directory, falling back to the
    /// directory of the running executable.
    ///
    /// # Errors
    ///
    /// [`MenuError::NotFound`] if neither location has the file, otherwise
    /// read and parse errors.
    pub fn load(file_name: &Path) -> Result<Self, MenuError> {
        let path = candidate_paths(file_name)
            .into_iter()
            .find(|p| p.is_file())
            .ok_or_else(|| MenuError::NotFound(file_name.to_path_buf()))?;
        info!("Loading menu from {}", path.display());
        let json = fs::read_to_string(&path).map_err(|source| MenuError::Io {
            path: path.clone(),
            source,
        })?;
        Menu::from_json(&json, &path)
    }

    /// Look up an item by its short name.
    ///
    /// # Errors
    ///
    /// [`MenuError::NoSuchItem`] if the menu has no such entry.
    pub fn item(&self, name: &str) -> Result<&MenuItem, MenuError> {
        self.items.get(name).ok_or_else(|| MenuError::NoSuchItem {
            item: name.to_string(),
            file: self.source.clone(),
        })
    }

    /// `name<TAB>title` lines, sorted by name.
    pub fn listing(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|(name, item)| format!("{name}\t{}", item.title))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Like [`Menu::load`], but a missing file is `Ok(None)` unless `required`.
    ///
    /// # Errors
    ///
    /// Read and parse errors, and [`MenuError::NotFound`] when `required`.
    pub fn load_optional(file_name: &Path, required: bool) -> Result<Option<Self>, MenuError> {
        match Menu::load(file_name) {
            Ok(menu) => Ok(Some(menu)),
            Err(MenuError::NotFound(_)) if !required => {
                debug!("No menu file {}", file_name.display());
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

fn candidate_paths(file_name: &Path) -> Vec<PathBuf> {
    let mut paths = vec![file_name.to_path_buf()];
    if file_name.is_relative() {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        if let Some(dir) = exe_dir {
            paths.push(dir.join(file_name));
        }
    }
    debug!("Menu search path: {:?}", paths);
    paths
}

/// Split a menu `args` string into words the way a POSIX shell would for
/// plain words, single quotes, double quotes and backslash escapes.
pub fn split_args(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                in_word = true;
                current.extend(chars.by_ref().take_while(|&q| q != '\''));
            }
            '"' => {
                in_word = true;
                while let Some(q) = chars.next() {
                    match q {
                        '"' => break,
                        '\\' => current.extend(chars.next()),
                        _ => current.push(q),
                    }
                }
            }
            '\\' => {
                in_word = true;
                current.extend(chars.next());
            }
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            _ => {
                in_word = true;
                current.push(c);
            }
        }
    }
    if in_word {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "hex2": { "title": "2-digit hex multiplication", "args": "-x -l 2" },
        "add3": { "title": "Three addends", "args": "-o ++ -l 3" }
    }"#;

    #[test]
    fn parses_items_and_lists_them_sorted() {
        let menu = Menu::from_json(SAMPLE, Path::new("drill_menu.json")).unwrap();
        assert_eq!(menu.item("hex2").unwrap().args, "-x -l 2");
        assert_eq!(
            menu.listing(),
            vec![
                "add3\tThree addends".to_string(),
                "hex2\t2-digit hex multiplication".to_string(),
            ]
        );
    }

    #[test]
    fn unknown_item_names_file_and_item() {
        let menu = Menu::from_json(SAMPLE, Path::new("drill_menu.json")).unwrap();
        let err = menu.item("nope").unwrap_err();
        assert_eq!(
            err.to_string(),
            "No such menu item nope found in drill_menu.json, ignoring"
        );
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Menu::from_json("{\"x\": {\"title\": 1}}", Path::new("m.json")).unwrap_err();
        assert!(matches!(err, MenuError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = Menu::load(Path::new("definitely/not/here/menu.json")).unwrap_err();
        assert!(matches!(err, MenuError::NotFound(_)));
    }

    #[test]
    fn missing_optional_file_is_none() {
        let path = Path::new("definitely/not/here/menu.json");
        assert!(matches!(Menu::load_optional(path, false), Ok(None)));
        assert!(matches!(Menu::load_optional(path, true), Err(MenuError::NotFound(_))));
    }

    #[test]
    fn split_args_handles_quotes_and_escapes() {
        assert_eq!(split_args("-x  -l 2"), vec!["-x", "-l", "2"]);
        assert_eq!(split_args("-m '3:6,6:3' -o \"++\""), vec!["-m", "3:6,6:3", "-o", "++"]);
        assert_eq!(split_args(r"-r a\ b ''"), vec!["-r", "a b", ""]);
        assert!(split_args("   ").is_empty());
    }
}
