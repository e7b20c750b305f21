//! The tab container.
//!
//! [`TabContainer`] is the single authority over the tab set. It creates,
//! closes and mutates tabs, keeps the display order and selection history
//! consistent, owns the tab strip's icon slots, and publishes every change
//! on its [`EventBus`].

use crate::drag::{DragReorder, DragState, Point, TabStripGeometry};
use crate::drop_hover::{DropHover, DropHoverAction, ScrollDirection};
use crate::history::SelectionHistory;
use crate::icon_slots::IconSlotAllocator;
use crate::index_map::TabIndexMap;
use crate::record::TabRecord;
use crate::restorer::{ClosedTab, TabRestorer};
use crate::view::TabView;
use chrono::Utc;
use explorer_tabs_core::{
    icon_channel, BrowserFactory, DefaultIcon, EventBus, IconReply, IconRequest, IconResolver,
    IconResult, IconSlot, Location, LockState, NavigationError, NavigationProgress, PropertyKind,
    SessionRecord, SubscriptionId, SystemIcon, TabCommand, TabConfig, TabError, TabEvent, TabId,
    TabQuery, TabResult, ViewSettings,
};
use std::collections::HashMap;
use std::time::Instant;
use tokio::sync::mpsc;

/// Where a new tab goes in the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// At this index, clamped to an append.
    Index(usize),
    /// Right after the selected tab, or at the end when nothing is selected.
    NextToCurrent,
    End,
}

/// Options for [`TabContainer::create_tab`].
#[derive(Debug, Clone, Default)]
pub struct TabSettings {
    /// `None` follows `open_new_tab_next_to_current`.
    pub placement: Option<Placement>,
    /// Make the new tab the active one.
    pub selected: bool,
    pub lock_state: LockState,
    pub custom_name: Option<String>,
    /// View configuration for the new session, when duplicating or
    /// restoring.
    pub view: Option<ViewSettings>,
}

impl TabSettings {
    /// Settings for a tab that becomes active.
    #[must_use]
    pub fn foreground() -> Self {
        TabSettings {
            selected: true,
            ..Self::default()
        }
    }

    /// Settings for a tab opened behind the current one.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn at(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    #[must_use]
    pub fn with_lock_state(mut self, lock_state: LockState) -> Self {
        self.lock_state = lock_state;
        self
    }

    #[must_use]
    pub fn with_custom_name(mut self, name: impl Into<String>) -> Self {
        self.custom_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_view(mut self, view: ViewSettings) -> Self {
        self.view = Some(view);
        self
    }
}

/// The result of creating a tab. The tab exists even when navigation failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedTab {
    pub id: TabId,
    /// The location the tab ended up at, or the last error once every
    /// fallback failed.
    pub navigation: Result<Location, NavigationError>,
}

impl CreatedTab {
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.navigation.is_ok()
    }
}

/// Creates, closes, selects and reorders tabs.
///
/// All methods run on the UI thread. Background work (icon lookups)
/// reports back through a channel that is drained with
/// [`TabContainer::drain_icon_results`] or awaited with
/// [`TabContainer::next_icon_result`].
///
/// # Example
///
/// ```ignore
/// let mut tabs = TabContainer::new(TabConfig::default(), factory, resolver);
/// let first = tabs.create_tab(Location::new("/srv"), TabSettings::foreground());
/// let second = tabs.create_tab(Location::new("/tmp"), TabSettings::background());
/// assert!(tabs.is_selected(first.id));
/// assert!(tabs.close_tab(second.id));
/// ```
pub struct TabContainer {
    config: TabConfig,
    factory: Box<dyn BrowserFactory>,
    resolver: Box<dyn IconResolver>,
    /// Live tabs keyed by id; display order lives in `order`
    tabs: HashMap<TabId, TabRecord>,
    order: TabIndexMap,
    selected: Option<TabId>,
    history: SelectionHistory,
    slots: IconSlotAllocator,
    bus: EventBus,
    drag: DragReorder,
    drop_hover: DropHover,
    restorer: TabRestorer,
    next_id: TabId,
    icon_reply: IconReply,
    icon_results: mpsc::UnboundedReceiver<IconResult>,
    pending_icon_lookups: usize,
    shutdown_requested: bool,
}

impl TabContainer {
    /// Creates an empty container.
    pub fn new(
        config: TabConfig,
        factory: impl BrowserFactory + 'static,
        resolver: impl IconResolver + 'static,
    ) -> Self {
        let (icon_reply, icon_results) = icon_channel();

        TabContainer {
            drop_hover: DropHover::new(config.drop.clone()),
            restorer: TabRestorer::new(config.closed_tab_capacity),
            config,
            factory: Box::new(factory),
            resolver: Box::new(resolver),
            tabs: HashMap::new(),
            order: TabIndexMap::new(),
            selected: None,
            history: SelectionHistory::new(),
            slots: IconSlotAllocator::new(),
            bus: EventBus::new(),
            drag: DragReorder::new(),
            next_id: 1,
            icon_reply,
            icon_results,
            pending_icon_lookups: 0,
            shutdown_requested: false,
        }
    }

    // ==================== Creation ====================

    /// Opens a new tab at `location`.
    ///
    /// When the location cannot be browsed the tab falls back to the
    /// default tab directory and then to the static default. The tab is
    /// kept even if all of them fail; [`CreatedTab::navigation`] reports
    /// where it ended up.
    pub fn create_tab(&mut self, location: Location, settings: TabSettings) -> CreatedTab {
        let id = self.next_id;
        self.next_id += 1;

        let browser = self.factory.create(settings.view);
        let mut record = TabRecord::new(
            id,
            self.slots.default_slot(DefaultIcon::GenericFolder),
            browser,
        );
        record.lock_state = settings.lock_state;
        record.custom_name = settings.custom_name.filter(|name| !name.is_empty());

        let index = self.insertion_index(settings.placement);
        let index = self.order.insert(index, id);
        self.tabs.insert(id, record);
        tracing::debug!("Inserted tab {} at index {}", id, index);
        if self.drag.cancel() {
            tracing::debug!("Drag cancelled by inserting tab {}", id);
        }

        let navigation = self.browse_with_fallback(id, location);
        if navigation.is_err() {
            self.refresh_icon(id);
        }

        // a non-empty strip always has an active tab
        if settings.selected || self.selected.is_none() {
            self.select(id);
        }

        let selected = self.selected == Some(id);
        self.emit(TabEvent::Created { tab: id, selected });

        match &navigation {
            Ok(location) => tracing::info!("Opened tab {} at {}", id, location),
            Err(err) => tracing::warn!("Opened tab {} without a location: {}", id, err),
        }

        CreatedTab { id, navigation }
    }

    /// Opens a new tab in the configured default directory.
    pub fn create_tab_in_default_directory(&mut self, settings: TabSettings) -> CreatedTab {
        let location = self.config.default_tab_directory.clone();
        self.create_tab(location, settings)
    }

    /// Opens the location and view of `id` in a new active tab. Lock state
    /// and custom name are not copied.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a live tab.
    pub fn duplicate_tab(&mut self, id: TabId) -> CreatedTab {
        let record = self.tab(id);
        let location = record
            .location()
            .unwrap_or_else(|| self.config.default_tab_directory.clone());
        let view = record.browser().export_view_settings();

        self.create_tab(location, TabSettings::foreground().with_view(view))
    }

    /// Opens the parent folder of `id` in a new active tab. Returns `None`
    /// when the tab is at a root.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a live tab.
    pub fn open_parent_in_new_tab(&mut self, id: TabId) -> Option<CreatedTab> {
        let parent = self.tab(id).browser().parent_location()?;
        Some(self.create_tab(parent, TabSettings::foreground()))
    }

    /// Reopens the most recently closed tab at its old position.
    pub fn reopen_closed_tab(&mut self) -> Option<CreatedTab> {
        let closed = self.restorer.take_most_recent()?;
        tracing::debug!("Reopening {} closed at {}", closed.location, closed.closed_at);

        let mut settings = TabSettings::foreground()
            .at(Placement::Index(closed.index))
            .with_view(closed.view);
        settings.custom_name = closed.custom_name;

        Some(self.create_tab(closed.location, settings))
    }

    fn insertion_index(&self, placement: Option<Placement>) -> usize {
        let placement = placement.unwrap_or(if self.config.open_new_tab_next_to_current {
            Placement::NextToCurrent
        } else {
            Placement::End
        });

        match placement {
            Placement::Index(index) => index,
            Placement::End => self.order.len(),
            Placement::NextToCurrent => self
                .selected
                .and_then(|id| self.order.index_of(id))
                .map_or(self.order.len(), |index| index + 1),
        }
    }

    fn browse_with_fallback(
        &mut self,
        id: TabId,
        requested: Location,
    ) -> Result<Location, NavigationError> {
        let candidates = [
            requested,
            self.config.default_tab_directory.clone(),
            self.config.default_tab_directory_static.clone(),
        ];

        let mut last_error = None;
        for (attempt, candidate) in candidates.iter().enumerate() {
            if candidates[..attempt].contains(candidate) {
                continue;
            }

            match self.browse(id, candidate.clone()) {
                Ok(_) => {
                    return Ok(self.tab(id).location().unwrap_or_else(|| candidate.clone()));
                }
                Err(err) => {
                    tracing::warn!("Tab {} could not open {}: {}", id, candidate, err);
                    last_error = Some(err);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            NavigationError::Unavailable("no location to browse to".to_string())
        }))
    }

    // ==================== Closing ====================

    /// Closes a tab.
    ///
    /// Returns false when the tab is locked, or when it is the last tab and
    /// closing the main window with it is disabled. Closing the last tab
    /// with that option enabled requests application shutdown and leaves
    /// the tab in place; check [`TabContainer::shutdown_requested`].
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a live tab.
    pub fn close_tab(&mut self, id: TabId) -> bool {
        let locked = self.tab(id).is_locked();

        if self.tabs.len() == 1 {
            if self.config.close_main_window_on_tab_close {
                tracing::info!("Last tab {} closed; shutting down", id);
                self.shutdown_requested = true;
                return true;
            }
            tracing::debug!("Refusing to close last tab {}", id);
            return false;
        }

        if locked {
            tracing::debug!("Refusing to close locked tab {}", id);
            return false;
        }

        self.remove_tab(id);
        true
    }

    /// Closes every tab except `id`, right to left. Locked tabs stay.
    /// Returns how many tabs were closed.
    pub fn close_other_tabs(&mut self, id: TabId) -> usize {
        let targets: Vec<TabId> = self
            .order
            .ids()
            .iter()
            .rev()
            .copied()
            .filter(|&tab| tab != id)
            .collect();
        self.close_all(targets)
    }

    /// Closes the tabs to the right of `id`, starting at the far end.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a live tab.
    pub fn close_tabs_to_right(&mut self, id: TabId) -> usize {
        let index = self.index_of_live(id);
        let targets: Vec<TabId> = self.order.ids()[index + 1..].iter().rev().copied().collect();
        self.close_all(targets)
    }

    fn close_all(&mut self, targets: Vec<TabId>) -> usize {
        targets
            .into_iter()
            .filter(|&tab| self.close_tab(tab))
            .count()
    }

    fn remove_tab(&mut self, id: TabId) {
        self.emit(TabEvent::PreRemoval { tab: id });

        if self.drag.cancel() {
            tracing::debug!("Drag cancelled by closing tab {}", id);
        }
        self.drop_hover.reset();

        let index = self.index_of_live(id);
        self.order.remove(id);
        self.history.remove_all(id);

        let successor = if self.selected == Some(id) {
            let successor = self.choose_successor(index);
            // reselection does not go through select(), so nothing is pushed
            self.selected = successor;
            successor
        } else {
            None
        };
        if let Some(selected) = self.selected {
            self.history.discard_top(selected);
        }

        if let Some(record) = self.tabs.remove(&id) {
            self.slots.release(record.icon_slot());
            if let Some(location) = record.location() {
                self.restorer.record(ClosedTab {
                    location,
                    view: record.browser().export_view_settings(),
                    index,
                    custom_name: record.custom_name.clone(),
                    closed_at: Utc::now(),
                });
            }
        }

        self.emit(TabEvent::Removed { tab: id });
        self.bus.retire_tab(id);
        tracing::info!("Closed tab {}", id);

        if let Some(next) = successor {
            tracing::debug!("Reselected tab {} after closing {}", next, id);
            self.emit(TabEvent::Selected {
                tab: next,
                previous: None,
            });
        }
    }

    /// Most recent live history entry, else the tab now at the closed
    /// tab's index, else the new last tab.
    fn choose_successor(&mut self, closed_index: usize) -> Option<TabId> {
        let order = &self.order;
        if let Some(tab) = self.history.pop_most_recent(|tab| order.contains(tab)) {
            return Some(tab);
        }

        let last = self.order.len().checked_sub(1)?;
        self.order.id_at(closed_index.min(last)).ok()
    }

    // ==================== Selection ====================

    /// Makes `id` the active tab. Returns false if it already was.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a live tab.
    pub fn select(&mut self, id: TabId) -> bool {
        self.assert_live(id);

        if self.selected == Some(id) {
            return false;
        }

        let previous = self.selected.replace(id);
        if let Some(previous) = previous {
            self.history.push(previous);
        }

        tracing::debug!("Selected tab {}", id);
        self.emit(TabEvent::Selected { tab: id, previous });
        true
    }

    /// Selects the tab at a strip position.
    ///
    /// # Errors
    ///
    /// Returns [`TabError::IndexOutOfRange`] if no tab is at `index`.
    pub fn select_at_index(&mut self, index: usize) -> TabResult<TabId> {
        let id = self.order.id_at(index)?;
        self.select(id);
        Ok(id)
    }

    /// Selects the next (or previous) tab, wrapping around at the ends.
    pub fn select_adjacent(&mut self, forward: bool) -> Option<TabId> {
        let current = self.selected.and_then(|id| self.order.index_of(id))?;
        let count = self.order.len();
        let index = if forward {
            (current + 1) % count
        } else {
            (current + count - 1) % count
        };

        let id = self.order.id_at(index).ok()?;
        self.select(id);
        Some(id)
    }

    // ==================== Properties ====================

    /// Applies a choice from the lock menu. Choosing the current state
    /// again unlocks the tab. Returns the resulting state.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a live tab.
    pub fn set_lock_state(&mut self, id: TabId, requested: LockState) -> LockState {
        let current = self.tab(id).lock_state();
        let next = current.toggled(requested);

        if next != current {
            self.tab_mut(id).lock_state = next;
            tracing::debug!("Tab {} lock state {:?} -> {:?}", id, current, next);
            self.emit(TabEvent::Updated {
                tab: id,
                property: PropertyKind::LockState,
            });
            self.refresh_icon(id);
        }

        next
    }

    /// Sets or clears the custom name. Empty names clear it. Returns true
    /// if the name changed.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a live tab.
    pub fn rename(&mut self, id: TabId, name: Option<String>) -> bool {
        let name = name.filter(|name| !name.is_empty());
        let record = self.tab_mut(id);
        if record.custom_name == name {
            return false;
        }

        record.custom_name = name;
        self.emit(TabEvent::Updated {
            tab: id,
            property: PropertyKind::Name,
        });
        true
    }

    /// Moves a tab to `index` (clamped). Returns the index it ended up at.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a live tab.
    pub fn move_tab(&mut self, id: TabId, index: usize) -> usize {
        let Some((from, to)) = self.order.move_to(id, index) else {
            panic!("move of tab {} that is not in the strip", id);
        };

        if from != to {
            self.drag.cancel();
            tracing::debug!("Moved tab {} from {} to {}", id, from, to);
            self.emit(TabEvent::Moved { tab: id, from, to });
        }
        to
    }

    // ==================== Navigation ====================

    /// Browses a tab to `location`.
    ///
    /// An address-locked tab is not navigated; `location` opens in a new
    /// active tab instead. Returns the id of the tab that shows it.
    ///
    /// # Errors
    ///
    /// Returns [`TabError::TabNotFound`] for unknown ids and
    /// [`TabError::Navigation`] when the browse fails. The tab keeps its
    /// previous location in that case.
    pub fn navigate(&mut self, id: TabId, location: Location) -> TabResult<TabId> {
        let record = self.get_tab(id).ok_or(TabError::TabNotFound(id))?;

        if record.lock_state() == LockState::AddressLocked {
            tracing::debug!("Tab {} is address locked; opening {} in a new tab", id, location);
            let created = self.create_tab(location, TabSettings::foreground());
            return Ok(created.id);
        }

        self.browse(id, location)?;
        Ok(id)
    }

    /// Re-reads the folder a tab shows.
    ///
    /// # Errors
    ///
    /// Returns [`TabError::TabNotFound`] for unknown ids and
    /// [`TabError::Navigation`] if the tab has no location or it vanished.
    pub fn refresh(&mut self, id: TabId) -> TabResult<()> {
        let record = self.get_tab(id).ok_or(TabError::TabNotFound(id))?;
        let location = record.location().ok_or_else(|| {
            NavigationError::Unavailable(format!("tab {} has no location", id))
        })?;

        self.emit(TabEvent::NavigationStarted {
            tab: id,
            location: location.clone(),
        });
        let previous_name = self.tab(id).display_name();
        let result = self.tab_mut(id).browser.refresh();
        self.finish_navigation(id, location, previous_name, result)?;
        Ok(())
    }

    /// Refreshes every tab. Returns how many failed.
    pub fn refresh_all(&mut self) -> usize {
        let ids = self.order.ids().to_vec();
        let mut failed = 0;
        for id in ids {
            if let Err(err) = self.refresh(id) {
                tracing::warn!("Refresh of tab {} failed: {}", id, err);
                failed += 1;
            }
        }
        failed
    }

    /// Reports that background enumeration of a committed navigation
    /// finished.
    ///
    /// # Errors
    ///
    /// Returns [`TabError::TabNotFound`] if the tab has closed meanwhile.
    pub fn notify_navigation_completed(&mut self, id: TabId) -> TabResult<()> {
        self.ensure_live(id)?;
        self.emit(TabEvent::NavigationCompleted { tab: id });
        Ok(())
    }

    /// Reports a change on disk in the folder a tab shows.
    ///
    /// # Errors
    ///
    /// Returns [`TabError::TabNotFound`] if the tab has closed meanwhile.
    pub fn notify_directory_modified(&mut self, id: TabId) -> TabResult<()> {
        self.ensure_live(id)?;
        self.emit(TabEvent::DirectoryModified { tab: id });
        Ok(())
    }

    fn browse(
        &mut self,
        id: TabId,
        location: Location,
    ) -> Result<NavigationProgress, NavigationError> {
        self.emit(TabEvent::NavigationStarted {
            tab: id,
            location: location.clone(),
        });

        let previous_name = self.tab(id).display_name();
        let result = self.tab_mut(id).browser.browse_to(&location);
        self.finish_navigation(id, location, previous_name, result)
    }

    fn finish_navigation(
        &mut self,
        id: TabId,
        requested: Location,
        previous_name: String,
        result: Result<NavigationProgress, NavigationError>,
    ) -> Result<NavigationProgress, NavigationError> {
        let progress = match result {
            Ok(progress) => progress,
            Err(err) => {
                self.emit(TabEvent::NavigationFailed { tab: id });
                return Err(err);
            }
        };

        let record = self.tab(id);
        let location = record.location().unwrap_or(requested);
        let name_changed = record.display_name() != previous_name;

        self.emit(TabEvent::NavigationCommitted { tab: id, location });
        self.refresh_icon(id);
        if name_changed {
            self.emit(TabEvent::Updated {
                tab: id,
                property: PropertyKind::Name,
            });
        }
        if progress == NavigationProgress::Completed {
            self.emit(TabEvent::NavigationCompleted { tab: id });
        }

        Ok(progress)
    }

    // ==================== Icons ====================

    /// Shows the right icon for a tab's current state and queues a lookup
    /// for its folder.
    fn refresh_icon(&mut self, id: TabId) {
        let record = self.tab(id);
        if record.is_locked() {
            let lock = self.slots.default_slot(DefaultIcon::Lock);
            self.assign_slot(id, lock);
            return;
        }

        let generic = self.slots.default_slot(DefaultIcon::GenericFolder);
        let Some(location) = record.location() else {
            self.assign_slot(id, generic);
            return;
        };
        let folder_instance = record.folder_instance();

        match self.resolver.cached_icon(&location) {
            Some(icon) => self.assign_system_icon(id, icon),
            None => self.assign_slot(id, generic),
        }

        let request = IconRequest {
            tab: id,
            folder_instance,
            location,
        };
        self.resolver.queue_lookup(request, self.icon_reply.clone());
        self.pending_icon_lookups += 1;
    }

    fn assign_system_icon(&mut self, id: TabId, icon: SystemIcon) {
        if icon == self.resolver.default_folder_icon() {
            let generic = self.slots.default_slot(DefaultIcon::GenericFolder);
            self.assign_slot(id, generic);
            return;
        }

        let current = self.tab(id).icon_slot();
        if self.slots.folder_icon(current) == Some(icon) {
            return;
        }

        // release first so the slot can be reused by this very assignment
        self.slots.release(current);
        let slot = self.slots.acquire_for_folder(icon);
        self.tab_mut(id).icon_slot = slot;
        self.emit(TabEvent::Updated {
            tab: id,
            property: PropertyKind::Icon,
        });
    }

    fn assign_slot(&mut self, id: TabId, slot: IconSlot) {
        let current = self.tab(id).icon_slot();
        if current == slot {
            return;
        }

        self.slots.release(current);
        self.tab_mut(id).icon_slot = slot;
        self.emit(TabEvent::Updated {
            tab: id,
            property: PropertyKind::Icon,
        });
    }

    /// Applies a finished icon lookup. Results for closed tabs, for an
    /// older visit of the folder, or for locked tabs are discarded.
    /// Returns true if the result was applied.
    pub fn apply_icon_result(&mut self, result: IconResult) -> bool {
        self.pending_icon_lookups = self.pending_icon_lookups.saturating_sub(1);

        let Some(record) = self.tabs.get(&result.tab) else {
            tracing::debug!("Discarding icon for closed tab {}", result.tab);
            return false;
        };

        if record.folder_instance() != result.folder_instance {
            tracing::debug!(
                "Discarding stale icon for tab {} ({:?} != {:?})",
                result.tab,
                result.folder_instance,
                record.folder_instance()
            );
            return false;
        }

        if record.is_locked() {
            return false;
        }

        self.assign_system_icon(result.tab, result.icon);
        true
    }

    /// Applies every icon result that has arrived. Returns how many were
    /// applied.
    pub fn drain_icon_results(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(result) = self.icon_results.try_recv() {
            if self.apply_icon_result(result) {
                applied += 1;
            }
        }
        applied
    }

    /// Waits for the next icon result and applies it. Returns whether it
    /// was applied.
    pub async fn next_icon_result(&mut self) -> Option<bool> {
        let result = self.icon_results.recv().await?;
        Some(self.apply_icon_result(result))
    }

    /// Lookups queued and not yet answered.
    #[must_use]
    pub fn pending_icon_lookups(&self) -> usize {
        self.pending_icon_lookups
    }

    #[must_use]
    pub fn icon_slots(&self) -> &IconSlotAllocator {
        &self.slots
    }

    // ==================== Drag Reorder ====================

    /// Starts dragging the tab at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`TabError::IndexOutOfRange`] if `index` names no tab.
    pub fn begin_drag(
        &mut self,
        index: usize,
        geometry: &dyn TabStripGeometry,
    ) -> TabResult<TabId> {
        let id = self.order.id_at(index)?;
        if !self.drag.begin(index, geometry) {
            return Err(TabError::IndexOutOfRange {
                index,
                count: self.order.len(),
            });
        }
        Ok(id)
    }

    /// Follows the pointer during a drag. Returns true if tabs were swapped.
    pub fn drag_pointer_move(&mut self, point: Point, geometry: &dyn TabStripGeometry) -> bool {
        let Some((from, to)) = self.drag.on_pointer_move(point, geometry) else {
            return false;
        };

        match self.order.swap(from, to) {
            Ok(()) => {
                tracing::trace!("Drag swapped tabs at {} and {}", from, to);
                true
            }
            Err(err) => {
                tracing::warn!("Drag geometry out of sync with the strip: {}", err);
                self.drag.cancel();
                false
            }
        }
    }

    /// Ends the drag. Returns `(tab, from, to)` and publishes
    /// [`TabEvent::Moved`] when the tab changed position.
    pub fn end_drag(&mut self) -> Option<(TabId, usize, usize)> {
        let (from, to) = self.drag.finish()?;
        let tab = self.order.id_at(to).ok()?;

        tracing::debug!("Dragged tab {} from {} to {}", tab, from, to);
        self.emit(TabEvent::Moved { tab, from, to });
        Some((tab, from, to))
    }

    /// Abandons the drag after capture loss. Swaps already made stay, no
    /// move is reported.
    pub fn cancel_drag(&mut self) -> bool {
        self.drag.cancel()
    }

    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    // ==================== Drop Hover ====================

    /// Tracks a drag-and-drop hovering the strip at `point`.
    pub fn update_drop_hover(
        &mut self,
        point: Point,
        geometry: &dyn TabStripGeometry,
        now: Instant,
    ) {
        let target = geometry.hit_test(point);
        self.drop_hover
            .update_for_drop(target, point.x, geometry.strip_width(), now);
    }

    /// Fires expired drop timers. Switches to the hovered tab itself and
    /// returns the scroll step, if any, for the host to perform.
    pub fn poll_drop_hover(&mut self, now: Instant) -> Option<ScrollDirection> {
        let mut scroll = None;
        for action in self.drop_hover.poll(now) {
            match action {
                DropHoverAction::SwitchTo(index) => {
                    if let Ok(id) = self.order.id_at(index) {
                        self.select(id);
                    }
                }
                DropHoverAction::Scroll(direction) => scroll = Some(direction),
            }
        }
        scroll
    }

    /// Cancels the drop timers when the drop ends or leaves the strip.
    pub fn reset_drop_hover(&mut self) {
        self.drop_hover.reset();
    }

    // ==================== Sessions ====================

    /// Snapshot of the strip for saving. Tabs that never resolved a
    /// location are skipped.
    #[must_use]
    pub fn export_session(&self) -> SessionRecord {
        let mut session = SessionRecord::default();
        for &id in self.order.ids() {
            if let Some(record) = self.tab(id).restore_record() {
                if self.selected == Some(id) {
                    session.selected_index = session.tabs.len();
                }
                session.tabs.push(record);
            }
        }
        session
    }

    /// Appends the tabs of a saved session and selects its active tab.
    pub fn restore_session(&mut self, session: &SessionRecord) -> Vec<CreatedTab> {
        let created: Vec<CreatedTab> = session
            .tabs
            .iter()
            .map(|saved| {
                let settings = TabSettings {
                    placement: Some(Placement::End),
                    selected: false,
                    lock_state: saved.lock_state,
                    custom_name: saved.custom_name.clone(),
                    view: Some(saved.view.clone()),
                };
                self.create_tab(saved.location.clone(), settings)
            })
            .collect();

        if let Some(last) = created.len().checked_sub(1) {
            let id = created[session.selected_index.min(last)].id;
            self.select(id);
        }

        tracing::info!("Restored {} tab(s)", created.len());
        created
    }

    #[must_use]
    pub fn closed_tabs(&self) -> &TabRestorer {
        &self.restorer
    }

    // ==================== Commands ====================

    /// Dispatches a command from the tab strip, its menus or the keyboard.
    ///
    /// # Errors
    ///
    /// Returns [`TabError::TabNotFound`] or [`TabError::IndexOutOfRange`]
    /// when the command names a tab that does not exist, and
    /// [`TabError::Navigation`] for failed navigations.
    pub fn handle_command(&mut self, command: TabCommand) -> TabResult<()> {
        tracing::trace!("Handling {:?}", command);

        match command {
            TabCommand::NewTab | TabCommand::DoubleClickBackground => {
                self.create_tab_in_default_directory(TabSettings::foreground());
            }
            TabCommand::NewTabAt(location) => {
                self.create_tab(location, TabSettings::foreground());
            }
            TabCommand::Duplicate(id) => {
                self.ensure_live(id)?;
                self.duplicate_tab(id);
            }
            TabCommand::OpenParentInNewTab(id) => {
                self.ensure_live(id)?;
                if self.open_parent_in_new_tab(id).is_none() {
                    tracing::debug!("Tab {} has no parent folder", id);
                }
            }
            TabCommand::ReopenClosed => {
                if self.reopen_closed_tab().is_none() {
                    tracing::debug!("No closed tab to reopen");
                }
            }
            TabCommand::Close(id) => {
                self.ensure_live(id)?;
                self.close_tab(id);
            }
            TabCommand::CloseSelected => {
                if let Some(id) = self.selected {
                    self.close_tab(id);
                }
            }
            TabCommand::CloseOthers(id) => {
                self.ensure_live(id)?;
                self.close_other_tabs(id);
            }
            TabCommand::CloseToRight(id) => {
                self.ensure_live(id)?;
                self.close_tabs_to_right(id);
            }
            TabCommand::Select(id) => {
                self.ensure_live(id)?;
                self.select(id);
            }
            TabCommand::SelectIndex(index) => {
                self.select_at_index(index)?;
            }
            TabCommand::Next => {
                self.select_adjacent(true);
            }
            TabCommand::Previous => {
                self.select_adjacent(false);
            }
            TabCommand::Rename(id, name) => {
                self.ensure_live(id)?;
                self.rename(id, name);
            }
            TabCommand::Lock(id) => {
                self.ensure_live(id)?;
                self.set_lock_state(id, LockState::Locked);
            }
            TabCommand::LockAddress(id) => {
                self.ensure_live(id)?;
                self.set_lock_state(id, LockState::AddressLocked);
            }
            TabCommand::Move(id, index) => {
                self.ensure_live(id)?;
                self.move_tab(id, index);
            }
            TabCommand::Navigate(id, location) => {
                self.navigate(id, location)?;
            }
            TabCommand::Refresh(id) => self.refresh(id)?,
            TabCommand::RefreshAll => {
                self.refresh_all();
            }
            TabCommand::DoubleClickTab(index) => {
                let id = self.order.id_at(index)?;
                if self.config.double_click_tab_close {
                    self.close_tab(id);
                }
            }
            TabCommand::MiddleClickTab(index) => {
                let id = self.order.id_at(index)?;
                self.close_tab(id);
            }
        }

        Ok(())
    }

    // ==================== Events ====================

    /// Subscribes to every tab event.
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&TabEvent, &dyn TabQuery) + 'static,
    {
        self.bus.subscribe(handler)
    }

    /// Subscribes to the events of one tab until it closes.
    ///
    /// # Errors
    ///
    /// Returns [`TabError::TabNotFound`] if the tab is not live.
    pub fn subscribe_tab<F>(&mut self, id: TabId, handler: F) -> TabResult<SubscriptionId>
    where
        F: FnMut(&TabEvent, &dyn TabQuery) + 'static,
    {
        self.ensure_live(id)?;
        Ok(self.bus.subscribe_tab(id, handler))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// A read-only view of the tab set, as subscribers see it.
    #[must_use]
    pub fn query(&self) -> impl TabQuery + '_ {
        TabView {
            tabs: &self.tabs,
            order: &self.order,
            selected: self.selected,
        }
    }

    fn emit(&mut self, event: TabEvent) {
        tracing::trace!("Publishing {:?}", event);
        let view = TabView {
            tabs: &self.tabs,
            order: &self.order,
            selected: self.selected,
        };
        self.bus.publish(&event, &view);
    }

    // ==================== Queries ====================

    /// Returns a live tab.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a live tab; ids handed out by events and
    /// queries are always live at that point.
    #[must_use]
    pub fn tab(&self, id: TabId) -> &TabRecord {
        match self.tabs.get(&id) {
            Some(record) => record,
            None => panic!("tab {} is not live", id),
        }
    }

    fn tab_mut(&mut self, id: TabId) -> &mut TabRecord {
        match self.tabs.get_mut(&id) {
            Some(record) => record,
            None => panic!("tab {} is not live", id),
        }
    }

    #[must_use]
    pub fn get_tab(&self, id: TabId) -> Option<&TabRecord> {
        self.tabs.get(&id)
    }

    /// Returns the tab at a strip position.
    ///
    /// # Errors
    ///
    /// Returns [`TabError::IndexOutOfRange`] if no tab is at `index`.
    pub fn tab_at_index(&self, index: usize) -> TabResult<&TabRecord> {
        let id = self.order.id_at(index)?;
        Ok(self.tab(id))
    }

    #[must_use]
    pub fn selected_tab(&self) -> Option<&TabRecord> {
        self.selected.map(|id| self.tab(id))
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<TabId> {
        self.selected
    }

    /// Tabs in display order.
    pub fn tabs_in_order(&self) -> impl Iterator<Item = &TabRecord> + '_ {
        self.order.ids().iter().map(|&id| self.tab(id))
    }

    #[must_use]
    pub fn tab_ids(&self) -> &[TabId] {
        self.order.ids()
    }

    #[must_use]
    pub fn index_of(&self, id: TabId) -> Option<usize> {
        self.order.index_of(id)
    }

    #[must_use]
    pub fn is_selected(&self, id: TabId) -> bool {
        self.selected == Some(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn selection_history(&self) -> &SelectionHistory {
        &self.history
    }

    #[must_use]
    pub fn config(&self) -> &TabConfig {
        &self.config
    }

    /// True once closing the last tab asked for the application to exit.
    #[must_use]
    pub fn shutdown_requested(&self) -> bool {
        self.shutdown_requested
    }

    fn ensure_live(&self, id: TabId) -> TabResult<()> {
        if self.tabs.contains_key(&id) {
            Ok(())
        } else {
            Err(TabError::TabNotFound(id))
        }
    }

    fn assert_live(&self, id: TabId) {
        if !self.tabs.contains_key(&id) {
            panic!("tab {} is not live", id);
        }
    }

    fn index_of_live(&self, id: TabId) -> usize {
        match self.order.index_of(id) {
            Some(index) => index,
            None => panic!("tab {} is not in the strip", id),
        }
    }
}

impl std::fmt::Debug for TabContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabContainer")
            .field("order", &self.order.ids())
            .field("selected", &self.selected)
            .field("history", &self.history)
            .field("pending_icon_lookups", &self.pending_icon_lookups)
            .field("shutdown_requested", &self.shutdown_requested)
            .finish()
    }
}
