//! Records exchanged with the persistence layer when tabs are saved and
//! restored.

use crate::error::TabResult;
use crate::location::{Location, ViewSettings};
use crate::tab::LockState;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Everything needed to recreate one tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabRestoreRecord {
    pub location: Location,
    #[serde(default)]
    pub lock_state: LockState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
    #[serde(default)]
    pub view: ViewSettings,
}

/// The saved tab strip: tabs in display order plus the selected position.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionRecord {
    pub tabs: Vec<TabRestoreRecord>,
    #[serde(default)]
    pub selected_index: usize,
}

impl SessionRecord {
    /// Parses a session from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TabError::Session`] for malformed documents.
    pub fn from_json(json: &str) -> TabResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encodes the session as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TabError::Session`] if encoding fails.
    pub fn to_json(&self) -> TabResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reads a session file.
    ///
    /// # Errors
    ///
    /// Returns an IO or session error.
    pub fn load(path: &Path) -> TabResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Writes the session file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an IO or session error.
    pub fn save(&self, path: &Path) -> TabResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TabError;

    #[test]
    fn test_minimal_record_uses_defaults() {
        let session = SessionRecord::from_json(r#"{"tabs":[{"location":"/home"}]}"#)
            .expect("should parse");
        assert_eq!(session.selected_index, 0);
        assert_eq!(session.tabs[0].lock_state, LockState::NotLocked);
        assert!(session.tabs[0].custom_name.is_none());
    }

    #[test]
    fn test_custom_name_omitted_when_absent() {
        let session = SessionRecord {
            tabs: vec![TabRestoreRecord {
                location: Location::new("/etc"),
                lock_state: LockState::Locked,
                custom_name: None,
                view: ViewSettings::default(),
            }],
            selected_index: 0,
        };
        let json = session.to_json().expect("encode");
        assert!(!json.contains("custom_name"));
        assert!(json.contains("\"locked\""));
    }

    #[test]
    fn test_malformed_session() {
        let result = SessionRecord::from_json("{ not json");
        assert!(matches!(result, Err(TabError::Session(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = SessionRecord::load(Path::new("/definitely/not/here/session.json"));
        assert!(matches!(result, Err(TabError::Io(_))));
    }
}
