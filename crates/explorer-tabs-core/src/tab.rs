//! Tab identity and per-tab state enums.

use serde::{Deserialize, Serialize};

/// Unique identifier for a tab.
///
/// Ids are handed out from an increasing counter and are never reused
/// while the process runs.
pub type TabId = u32;

/// Whether a tab may be closed or navigated away from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockState {
    #[default]
    NotLocked,
    /// The tab cannot be closed.
    Locked,
    /// The tab cannot be closed and navigations open in a new tab instead.
    AddressLocked,
}

impl LockState {
    /// Returns true for both locked variants.
    ///
    /// ```
    /// use explorer_tabs_core::LockState;
    ///
    /// assert!(LockState::Locked.is_locked());
    /// assert!(LockState::AddressLocked.is_locked());
    /// assert!(!LockState::NotLocked.is_locked());
    /// ```
    #[must_use]
    pub fn is_locked(self) -> bool {
        !matches!(self, LockState::NotLocked)
    }

    /// The state that results from choosing `requested` in the lock menu
    /// while the tab is in `self`. Choosing the active option again
    /// unlocks the tab.
    ///
    /// ```
    /// use explorer_tabs_core::LockState;
    ///
    /// assert_eq!(LockState::Locked.toggled(LockState::Locked), LockState::NotLocked);
    /// assert_eq!(LockState::Locked.toggled(LockState::AddressLocked), LockState::AddressLocked);
    /// ```
    #[must_use]
    pub fn toggled(self, requested: LockState) -> LockState {
        if self == requested {
            LockState::NotLocked
        } else {
            requested
        }
    }
}

/// The tab property that changed in a [`crate::TabEvent::Updated`] event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    LockState,
    Name,
    Icon,
}
