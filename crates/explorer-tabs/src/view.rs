//! Read-only view of the tab set handed to bus subscribers.

use crate::index_map::TabIndexMap;
use crate::record::TabRecord;
use explorer_tabs_core::{IconSlot, Location, LockState, TabId, TabQuery};
use std::collections::HashMap;

/// Borrows the container's tab storage while an event is delivered.
pub(crate) struct TabView<'a> {
    pub(crate) tabs: &'a HashMap<TabId, TabRecord>,
    pub(crate) order: &'a TabIndexMap,
    pub(crate) selected: Option<TabId>,
}

impl TabQuery for TabView<'_> {
    fn tab_count(&self) -> usize {
        self.order.len()
    }

    fn tab_ids_in_order(&self) -> Vec<TabId> {
        self.order.ids().to_vec()
    }

    fn index_of(&self, tab: TabId) -> Option<usize> {
        self.order.index_of(tab)
    }

    fn selected(&self) -> Option<TabId> {
        self.selected
    }

    fn display_name(&self, tab: TabId) -> Option<String> {
        self.tabs.get(&tab).map(TabRecord::display_name)
    }

    fn location(&self, tab: TabId) -> Option<Location> {
        self.tabs.get(&tab).and_then(TabRecord::location)
    }

    fn lock_state(&self, tab: TabId) -> Option<LockState> {
        self.tabs.get(&tab).map(TabRecord::lock_state)
    }

    fn icon_slot(&self, tab: TabId) -> Option<IconSlot> {
        self.tabs.get(&tab).map(TabRecord::icon_slot)
    }
}
