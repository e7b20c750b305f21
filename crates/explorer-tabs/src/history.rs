//! Most-recently-selected stack used to pick a successor when the active
//! tab closes.

use explorer_tabs_core::TabId;

/// Previously selected tabs, most recent last.
///
/// Only *previous* selections are pushed, so the active tab is never on top
/// of its own history while it stays selected.
#[derive(Debug, Clone, Default)]
pub struct SelectionHistory {
    entries: Vec<TabId>,
}

impl SelectionHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `tab` was the selection before a change.
    pub fn push(&mut self, tab: TabId) {
        self.entries.push(tab);
    }

    /// Drops every entry for `tab`. Returns how many were dropped.
    ///
    /// Entries that end up next to each other are merged, so `[a, x, a]`
    /// becomes `[a]`.
    pub fn remove_all(&mut self, tab: TabId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|&entry| entry != tab);
        let removed = before - self.entries.len();
        self.entries.dedup();
        removed
    }

    /// Pops entries for `tab` off the top. Used after a removal so the
    /// selected tab never tops its own history.
    pub fn discard_top(&mut self, tab: TabId) {
        while self.entries.last() == Some(&tab) {
            self.entries.pop();
        }
    }

    /// Pops the most recent entry that `is_live` accepts, discarding dead
    /// entries on the way.
    pub fn pop_most_recent(&mut self, mut is_live: impl FnMut(TabId) -> bool) -> Option<TabId> {
        while let Some(tab) = self.entries.pop() {
            if is_live(tab) {
                return Some(tab);
            }
            tracing::trace!("Pruned closed tab {} from selection history", tab);
        }
        None
    }

    #[must_use]
    pub fn peek(&self) -> Option<TabId> {
        self.entries.last().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries from oldest to most recent.
    pub fn iter(&self) -> impl Iterator<Item = TabId> + '_ {
        self.entries.iter().copied()
    }
}
