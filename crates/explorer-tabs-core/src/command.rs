//! Commands that the tab strip, its context menus and keyboard shortcuts
//! send to the tab container.

use crate::location::Location;
use crate::tab::TabId;

/// A user-level tab command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabCommand {
    // === Creation ===
    /// Open a selected tab in the default directory.
    NewTab,
    /// Open a selected tab at a location.
    NewTabAt(Location),
    Duplicate(TabId),
    OpenParentInNewTab(TabId),
    ReopenClosed,

    // === Closing ===
    Close(TabId),
    CloseSelected,
    /// Close every tab except this one.
    CloseOthers(TabId),
    CloseToRight(TabId),

    // === Selection ===
    Select(TabId),
    SelectIndex(usize),
    Next,
    Previous,

    // === Properties ===
    Rename(TabId, Option<String>),
    /// Toggle the plain lock.
    Lock(TabId),
    /// Toggle the lock that also pins the address.
    LockAddress(TabId),
    Move(TabId, usize),

    // === Navigation ===
    Navigate(TabId, Location),
    Refresh(TabId),
    RefreshAll,

    // === Tab strip pointer input ===
    DoubleClickTab(usize),
    MiddleClickTab(usize),
    DoubleClickBackground,
}

impl TabCommand {
    /// Returns true for commands that may remove tabs.
    ///
    /// ```
    /// use explorer_tabs_core::TabCommand;
    ///
    /// assert!(TabCommand::CloseOthers(1).closes_tabs());
    /// assert!(!TabCommand::Next.closes_tabs());
    /// ```
    #[must_use]
    pub fn closes_tabs(&self) -> bool {
        matches!(
            self,
            TabCommand::Close(_)
                | TabCommand::CloseSelected
                | TabCommand::CloseOthers(_)
                | TabCommand::CloseToRight(_)
                | TabCommand::DoubleClickTab(_)
                | TabCommand::MiddleClickTab(_)
        )
    }
}
