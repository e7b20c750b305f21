//! Browse locations and per-folder view settings.
//!
//! A [`Location`] is the opaque identifier the navigation collaborator
//! resolves. The core never interprets it beyond equality and display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Identifier of a browsable location (a filesystem path or a shell
/// namespace name such as the computer folder).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location(String);

impl Location {
    /// Creates a location from anything string-like.
    pub fn new(raw: impl Into<String>) -> Self {
        Location(raw.into())
    }

    /// Creates a location from a filesystem path (lossy on non-UTF-8 paths).
    pub fn from_path(path: &Path) -> Self {
        Location(path.to_string_lossy().into_owned())
    }

    /// The raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Location {
    fn from(raw: &str) -> Self {
        Location::new(raw)
    }
}

impl From<String> for Location {
    fn from(raw: String) -> Self {
        Location(raw)
    }
}

/// Token identifying one particular visit of a folder.
///
/// The navigation collaborator hands out a fresh token on every successful
/// navigation or refresh, so an asynchronous result tagged with an older
/// token can be recognised as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FolderInstance(pub u64);

/// How the listing of a folder is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    ExtraLargeIcons,
    LargeIcons,
    Icons,
    SmallIcons,
    List,
    #[default]
    Details,
    Tiles,
    Thumbnails,
}

/// Folder view configuration carried across duplication, session restore
/// and reopen-closed-tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    pub view_mode: ViewMode,
    pub sort_column: String,
    pub sort_ascending: bool,
    pub show_hidden: bool,
    pub columns: Vec<String>,
}

impl Default for ViewSettings {
    fn default() -> Self {
        ViewSettings {
            view_mode: ViewMode::Details,
            sort_column: "name".to_string(),
            sort_ascending: true,
            show_hidden: false,
            columns: vec![
                "name".to_string(),
                "type".to_string(),
                "size".to_string(),
                "modified".to_string(),
            ],
        }
    }
}
