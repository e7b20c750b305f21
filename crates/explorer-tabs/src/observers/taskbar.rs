//! Per-tab taskbar thumbnail proxies.
//!
//! One proxy exists per tab. The proxies carry what the shell needs to show
//! a tab in the taskbar: its title, its icon, its position relative to the
//! other proxies and whether its thumbnail bitmap has to be recaptured.

use crate::container::TabContainer;
use explorer_tabs_core::{IconSlot, PropertyKind, TabEvent, TabId, TabQuery};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabProxy {
    pub tab: TabId,
    pub title: String,
    pub icon: Option<IconSlot>,
    /// Proxy this one is ordered in front of; `None` means last.
    pub order_before: Option<TabId>,
    /// How often the thumbnail was marked stale.
    pub invalidations: usize,
}

impl TabProxy {
    fn new(tab: TabId, tabs: &dyn TabQuery) -> Self {
        TabProxy {
            tab,
            title: tabs.display_name(tab).unwrap_or_default(),
            icon: tabs.icon_slot(tab),
            order_before: None,
            invalidations: 0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskbarProxies {
    enabled: bool,
    proxies: Vec<TabProxy>,
    active: Option<TabId>,
}

impl TaskbarProxies {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        TaskbarProxies {
            enabled,
            ..Self::default()
        }
    }

    /// Subscribes to `tabs` and creates proxies for the tabs already open,
    /// in display order.
    pub fn attach(tabs: &mut TabContainer) -> Rc<RefCell<TaskbarProxies>> {
        let mut proxies = TaskbarProxies::new(tabs.config().show_taskbar_thumbnails);
        {
            let view = tabs.query();
            for tab in view.tab_ids_in_order() {
                proxies.create_proxy(tab, &view);
            }
            if let Some(selected) = view.selected() {
                proxies.on_selected(selected, &view);
            }
        }

        let state = Rc::new(RefCell::new(proxies));
        let sink = Rc::clone(&state);
        tabs.subscribe(move |event: &TabEvent, view: &dyn TabQuery| {
            sink.borrow_mut().on_event(event, view)
        });
        state
    }

    pub fn on_event(&mut self, event: &TabEvent, tabs: &dyn TabQuery) {
        if !self.enabled {
            return;
        }

        match event {
            TabEvent::Created { tab, selected } => {
                self.create_proxy(*tab, tabs);
                if *selected {
                    self.active = Some(*tab);
                }
            }
            TabEvent::Removed { tab } => self.remove_proxy(*tab),
            TabEvent::Selected { tab, .. } => self.on_selected(*tab, tabs),
            TabEvent::NavigationCommitted { tab, .. } => {
                if let Some(proxy) = self.proxy_mut(*tab) {
                    proxy.invalidations += 1;
                    proxy.icon = tabs.icon_slot(*tab);
                    proxy.title = tabs.display_name(*tab).unwrap_or_default();
                }
            }
            TabEvent::NavigationCompleted { tab } => {
                if let Some(proxy) = self.proxy_mut(*tab) {
                    proxy.invalidations += 1;
                }
            }
            TabEvent::Updated { tab, property } => {
                if let Some(proxy) = self.proxy_mut(*tab) {
                    match property {
                        PropertyKind::Icon | PropertyKind::LockState => {
                            proxy.icon = tabs.icon_slot(*tab)
                        }
                        PropertyKind::Name => {
                            proxy.title = tabs.display_name(*tab).unwrap_or_default()
                        }
                    }
                }
            }
            _ => {}
        }
    }

    fn create_proxy(&mut self, tab: TabId, tabs: &dyn TabQuery) {
        if !self.enabled || self.proxy(tab).is_some() {
            return;
        }
        tracing::trace!("Created taskbar proxy for tab {}", tab);
        self.proxies.push(TabProxy::new(tab, tabs));
    }

    fn remove_proxy(&mut self, tab: TabId) {
        let before = self.proxies.len();
        self.proxies.retain(|proxy| proxy.tab != tab);
        if before == self.proxies.len() {
            tracing::warn!("No taskbar proxy for removed tab {}", tab);
        }
        if self.active == Some(tab) {
            self.active = None;
        }
    }

    /// The active proxy moves in front of the proxy of the tab after it,
    /// since the tab may have changed position since it was registered.
    fn on_selected(&mut self, tab: TabId, tabs: &dyn TabQuery) {
        let next = tabs.index_of(tab).and_then(|index| {
            let order = tabs.tab_ids_in_order();
            order.get(index + 1).copied()
        });
        let next = next.filter(|&next| self.proxy(next).is_some());

        if let Some(proxy) = self.proxy_mut(tab) {
            proxy.order_before = next;
            self.active = Some(tab);
        }
    }

    /// Drops every proxy, e.g. when the application shuts down.
    pub fn clear(&mut self) {
        self.proxies.clear();
        self.active = None;
    }

    #[must_use]
    pub fn proxy(&self, tab: TabId) -> Option<&TabProxy> {
        self.proxies.iter().find(|proxy| proxy.tab == tab)
    }

    fn proxy_mut(&mut self, tab: TabId) -> Option<&mut TabProxy> {
        self.proxies.iter_mut().find(|proxy| proxy.tab == tab)
    }

    /// Proxies in registration order.
    #[must_use]
    pub fn proxies(&self) -> &[TabProxy] {
        &self.proxies
    }

    #[must_use]
    pub fn active(&self) -> Option<TabId> {
        self.active
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::TabSettings;
    use crate::test_support::{test_config, MockWorld};
    use explorer_tabs_core::{DefaultIcon, Location, LockState, TabConfig};

    fn container(enabled: bool) -> (TabContainer, MockWorld) {
        let world = MockWorld::new();
        let config = TabConfig {
            show_taskbar_thumbnails: enabled,
            ..test_config()
        };
        let tabs = TabContainer::new(config, world.factory(), world.resolver());
        (tabs, world)
    }

    fn open(tabs: &mut TabContainer, path: &str, selected: bool) -> TabId {
        let settings = if selected {
            TabSettings::foreground()
        } else {
            TabSettings::background()
        };
        tabs.create_tab(Location::new(path), settings).id
    }

    #[test]
    fn test_proxy_per_tab() {
        let (mut tabs, _world) = container(true);
        let taskbar = TaskbarProxies::attach(&mut tabs);

        let a = open(&mut tabs, "/srv", true);
        let b = open(&mut tabs, "/tmp", false);

        let taskbar_ref = taskbar.borrow();
        assert_eq!(taskbar_ref.proxies().len(), 2);
        assert_eq!(taskbar_ref.proxy(a).map(|p| p.title.as_str()), Some("srv"));
        assert_eq!(taskbar_ref.proxy(b).map(|p| p.title.as_str()), Some("tmp"));
        assert_eq!(taskbar_ref.active(), Some(a));
    }

    #[test]
    fn test_attach_seeds_existing_tabs() {
        let (mut tabs, _world) = container(true);
        let a = open(&mut tabs, "/a", true);
        let b = open(&mut tabs, "/b", false);

        let taskbar = TaskbarProxies::attach(&mut tabs);
        let taskbar = taskbar.borrow();
        let order: Vec<TabId> = taskbar.proxies().iter().map(|p| p.tab).collect();
        assert_eq!(order, vec![a, b]);
        assert_eq!(taskbar.active(), Some(a));
        assert_eq!(taskbar.proxy(a).and_then(|p| p.order_before), Some(b));
    }

    #[test]
    fn test_selection_sets_order_hint() {
        let (mut tabs, _world) = container(true);
        let taskbar = TaskbarProxies::attach(&mut tabs);
        let a = open(&mut tabs, "/a", true);
        let b = open(&mut tabs, "/b", false);
        let c = open(&mut tabs, "/c", false);

        tabs.select(b);
        assert_eq!(taskbar.borrow().proxy(b).and_then(|p| p.order_before), Some(c));
        assert_eq!(taskbar.borrow().active(), Some(b));

        tabs.move_tab(b, 2);
        tabs.select(a);
        tabs.select(b);
        assert_eq!(taskbar.borrow().proxy(b).and_then(|p| p.order_before), None);
    }

    #[test]
    fn test_removed_tab_drops_proxy() {
        let (mut tabs, _world) = container(true);
        let taskbar = TaskbarProxies::attach(&mut tabs);
        let a = open(&mut tabs, "/a", true);
        let b = open(&mut tabs, "/b", true);

        tabs.close_tab(b);
        let taskbar = taskbar.borrow();
        assert!(taskbar.proxy(b).is_none());
        assert_eq!(taskbar.active(), Some(a));
    }

    #[test]
    fn test_navigation_invalidates_thumbnail() {
        let (mut tabs, _world) = container(true);
        let taskbar = TaskbarProxies::attach(&mut tabs);
        let a = open(&mut tabs, "/a", true);

        tabs.navigate(a, Location::new("/b")).expect("navigates");

        let taskbar = taskbar.borrow();
        let proxy = taskbar.proxy(a).expect("proxy exists");
        assert_eq!(proxy.title, "b");
        // commit and completion each invalidate
        assert_eq!(proxy.invalidations, 2);
    }

    #[test]
    fn test_icon_and_name_updates_are_mirrored() {
        let (mut tabs, _world) = container(true);
        let taskbar = TaskbarProxies::attach(&mut tabs);
        let a = open(&mut tabs, "/a", true);

        tabs.set_lock_state(a, LockState::Locked);
        tabs.rename(a, Some("Pinned".to_string()));

        let taskbar = taskbar.borrow();
        let proxy = taskbar.proxy(a).expect("proxy exists");
        assert_eq!(
            proxy.icon,
            Some(tabs.icon_slots().default_slot(DefaultIcon::Lock))
        );
        assert_eq!(proxy.title, "Pinned");
    }

    #[test]
    fn test_disabled_keeps_no_proxies() {
        let (mut tabs, _world) = container(false);
        open(&mut tabs, "/a", true);
        let taskbar = TaskbarProxies::attach(&mut tabs);
        open(&mut tabs, "/b", true);

        assert!(!taskbar.borrow().is_enabled());
        assert!(taskbar.borrow().proxies().is_empty());
    }

    #[test]
    fn test_clear() {
        let (mut tabs, _world) = container(true);
        let taskbar = TaskbarProxies::attach(&mut tabs);
        open(&mut tabs, "/a", true);

        taskbar.borrow_mut().clear();
        assert!(taskbar.borrow().proxies().is_empty());
        assert_eq!(taskbar.borrow().active(), None);
    }
}
