//! Tab events and the synchronous bus that publishes them.
//!
//! Observers (window title, taskbar proxies, tab-bar visibility) subscribe
//! to the [`EventBus`] and receive every [`TabEvent`] together with a
//! read-only [`TabQuery`] view of the tab set, so they never need to hold
//! on to the container itself.

use crate::icon::IconSlot;
use crate::location::Location;
use crate::tab::{LockState, PropertyKind, TabId};

/// Events published by the tab container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabEvent {
    // === Lifecycle ===
    /// A tab was created; `selected` is true if it became the active tab.
    Created { tab: TabId, selected: bool },
    /// A tab is about to be removed. It is still fully queryable.
    PreRemoval { tab: TabId },
    /// A tab was removed and its id is no longer live.
    Removed { tab: TabId },
    /// The active tab changed.
    Selected {
        tab: TabId,
        previous: Option<TabId>,
    },
    /// A tab changed position in the strip.
    Moved { tab: TabId, from: usize, to: usize },
    /// A tab property changed.
    Updated { tab: TabId, property: PropertyKind },

    // === Navigation ===
    NavigationStarted { tab: TabId, location: Location },
    NavigationCommitted { tab: TabId, location: Location },
    NavigationCompleted { tab: TabId },
    NavigationFailed { tab: TabId },
    /// The folder shown by a tab changed on disk.
    DirectoryModified { tab: TabId },
}

impl TabEvent {
    /// The tab the event refers to.
    ///
    /// ```
    /// use explorer_tabs_core::TabEvent;
    ///
    /// assert_eq!(TabEvent::Removed { tab: 3 }.tab_id(), 3);
    /// ```
    #[must_use]
    pub fn tab_id(&self) -> TabId {
        match self {
            TabEvent::Created { tab, .. }
            | TabEvent::PreRemoval { tab }
            | TabEvent::Removed { tab }
            | TabEvent::Selected { tab, .. }
            | TabEvent::Moved { tab, .. }
            | TabEvent::Updated { tab, .. }
            | TabEvent::NavigationStarted { tab, .. }
            | TabEvent::NavigationCommitted { tab, .. }
            | TabEvent::NavigationCompleted { tab }
            | TabEvent::NavigationFailed { tab }
            | TabEvent::DirectoryModified { tab } => *tab,
        }
    }

    /// Returns true for the navigation family of events.
    #[must_use]
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            TabEvent::NavigationStarted { .. }
                | TabEvent::NavigationCommitted { .. }
                | TabEvent::NavigationCompleted { .. }
                | TabEvent::NavigationFailed { .. }
                | TabEvent::DirectoryModified { .. }
        )
    }
}

/// Read-only access to the tab set at the moment an event is delivered.
pub trait TabQuery {
    /// Number of live tabs.
    fn tab_count(&self) -> usize;

    /// Live tab ids in display order.
    fn tab_ids_in_order(&self) -> Vec<TabId>;

    /// Display position of `tab`.
    fn index_of(&self, tab: TabId) -> Option<usize>;

    /// The active tab, if any.
    fn selected(&self) -> Option<TabId>;

    /// Name shown on the tab (custom name or the folder's display name).
    fn display_name(&self, tab: TabId) -> Option<String>;

    /// Location currently shown by the tab.
    fn location(&self, tab: TabId) -> Option<Location>;

    fn lock_state(&self, tab: TabId) -> Option<LockState>;

    fn icon_slot(&self, tab: TabId) -> Option<IconSlot>;
}

/// Identifies a subscription so it can be removed.
pub type SubscriptionId = u64;

type Handler = Box<dyn FnMut(&TabEvent, &dyn TabQuery)>;

struct Subscription {
    id: SubscriptionId,
    /// Tab whose lifetime bounds this subscription, if any.
    scope: Option<TabId>,
    handler: Handler,
}

/// Synchronous, in-process publish/subscribe for [`TabEvent`]s.
///
/// `publish` returns only after every current subscriber has run, in
/// subscription order. Subscriptions made with [`EventBus::subscribe_tab`]
/// only see events for their tab and are retired together with it.
///
/// # Example
///
/// ```
/// use explorer_tabs_core::{EventBus, TabEvent, TabQuery};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let mut bus = EventBus::new();
/// let sink = Rc::clone(&seen);
/// bus.subscribe(move |event: &TabEvent, _: &dyn TabQuery| {
///     sink.borrow_mut().push(event.tab_id());
/// });
/// assert_eq!(bus.subscriber_count(), 1);
/// ```
#[derive(Default)]
pub struct EventBus {
    subscriptions: Vec<Subscription>,
    next_id: SubscriptionId,
}

impl EventBus {
    /// Creates a bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        EventBus {
            subscriptions: Vec::new(),
            next_id: 1,
        }
    }

    /// Subscribes to every event.
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&TabEvent, &dyn TabQuery) + 'static,
    {
        self.insert(None, Box::new(handler))
    }

    /// Subscribes to events about `tab` only, for as long as `tab` lives.
    pub fn subscribe_tab<F>(&mut self, tab: TabId, handler: F) -> SubscriptionId
    where
        F: FnMut(&TabEvent, &dyn TabQuery) + 'static,
    {
        self.insert(Some(tab), Box::new(handler))
    }

    fn insert(&mut self, scope: Option<TabId>, handler: Handler) -> SubscriptionId {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        self.subscriptions.push(Subscription { id, scope, handler });
        id
    }

    /// Removes a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        before != self.subscriptions.len()
    }

    /// Drops every subscription scoped to `tab`. Returns how many were
    /// removed.
    pub fn retire_tab(&mut self, tab: TabId) -> usize {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.scope != Some(tab));
        let retired = before - self.subscriptions.len();
        if retired > 0 {
            tracing::trace!("Retired {} subscription(s) for tab {}", retired, tab);
        }
        retired
    }

    /// Delivers `event` to all matching subscribers before returning.
    pub fn publish(&mut self, event: &TabEvent, tabs: &dyn TabQuery) {
        let tab = event.tab_id();
        for subscription in &mut self.subscriptions {
            if subscription.scope.is_none_or(|scope| scope == tab) {
                (subscription.handler)(event, tabs);
            }
        }
    }

    /// Returns the number of active subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}
