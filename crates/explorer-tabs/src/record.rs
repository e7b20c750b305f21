//! Per-tab state owned by the container.

use explorer_tabs_core::{
    BrowserSession, FolderInstance, IconSlot, Location, LockState, TabId, TabRestoreRecord,
};
use std::fmt;

/// One open tab.
///
/// Records are created and destroyed only by the
/// [`TabContainer`](crate::TabContainer); callers get shared references.
pub struct TabRecord {
    id: TabId,
    pub(crate) lock_state: LockState,
    pub(crate) custom_name: Option<String>,
    pub(crate) icon_slot: IconSlot,
    pub(crate) browser: Box<dyn BrowserSession>,
}

impl TabRecord {
    pub(crate) fn new(id: TabId, icon_slot: IconSlot, browser: Box<dyn BrowserSession>) -> Self {
        TabRecord {
            id,
            lock_state: LockState::NotLocked,
            custom_name: None,
            icon_slot,
            browser,
        }
    }

    #[must_use]
    pub fn id(&self) -> TabId {
        self.id
    }

    #[must_use]
    pub fn lock_state(&self) -> LockState {
        self.lock_state
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.lock_state.is_locked()
    }

    /// The user-assigned name, if any.
    #[must_use]
    pub fn custom_name(&self) -> Option<&str> {
        self.custom_name.as_deref()
    }

    /// The name shown on the tab: the custom name when set, otherwise the
    /// folder's display name.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self.custom_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.browser.display_name(),
        }
    }

    #[must_use]
    pub fn icon_slot(&self) -> IconSlot {
        self.icon_slot
    }

    /// `None` until the tab's first navigation resolves.
    #[must_use]
    pub fn location(&self) -> Option<Location> {
        self.browser.current_location()
    }

    #[must_use]
    pub fn folder_instance(&self) -> FolderInstance {
        self.browser.folder_instance()
    }

    /// The tab's navigation collaborator.
    #[must_use]
    pub fn browser(&self) -> &dyn BrowserSession {
        self.browser.as_ref()
    }

    /// Snapshot used for session saving. `None` for tabs that never
    /// resolved a location.
    #[must_use]
    pub fn restore_record(&self) -> Option<TabRestoreRecord> {
        Some(TabRestoreRecord {
            location: self.location()?,
            lock_state: self.lock_state,
            custom_name: self.custom_name.clone(),
            view: self.browser.export_view_settings(),
        })
    }
}

impl fmt::Debug for TabRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabRecord")
            .field("id", &self.id)
            .field("lock_state", &self.lock_state)
            .field("custom_name", &self.custom_name)
            .field("icon_slot", &self.icon_slot)
            .field("location", &self.location())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockBrowser;

    fn record_at(path: Option<&str>) -> TabRecord {
        let mut browser = MockBrowser::new();
        if let Some(path) = path {
            browser.location = Some(Location::new(path));
        }
        TabRecord::new(7, IconSlot(1), Box::new(browser))
    }

    #[test]
    fn test_display_name_falls_back_to_folder() {
        let mut record = record_at(Some("/usr/share"));
        assert_eq!(record.display_name(), "share");

        record.custom_name = Some("Docs".to_string());
        assert_eq!(record.display_name(), "Docs");

        record.custom_name = Some(String::new());
        assert_eq!(record.display_name(), "share");
    }

    #[test]
    fn test_restore_record_requires_location() {
        assert!(record_at(None).restore_record().is_none());

        let mut record = record_at(Some("/srv"));
        record.lock_state = LockState::AddressLocked;
        let saved = record.restore_record().expect("resolved tab");
        assert_eq!(saved.location, Location::new("/srv"));
        assert_eq!(saved.lock_state, LockState::AddressLocked);
        assert!(saved.custom_name.is_none());
    }

    #[test]
    fn test_debug_includes_location() {
        let debug = format!("{:?}", record_at(Some("/tmp")));
        assert!(debug.contains("TabRecord"));
        assert!(debug.contains("/tmp"));
    }
}
