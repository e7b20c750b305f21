//! Keeps the main window title in line with the active tab.

use crate::container::TabContainer;
use explorer_tabs_core::{PropertyKind, TabEvent, TabQuery};
use std::cell::RefCell;
use std::rc::Rc;

pub const APP_NAME: &str = "Explorer++";

/// The title shown on the main window.
#[derive(Debug, Clone)]
pub struct WindowTitle {
    title: String,
    show_full_path: bool,
    updates: usize,
}

impl WindowTitle {
    #[must_use]
    pub fn new(show_full_path: bool) -> Self {
        WindowTitle {
            title: APP_NAME.to_string(),
            show_full_path,
            updates: 0,
        }
    }

    /// Subscribes a title tracker to `tabs`, seeded from the current
    /// selection.
    pub fn attach(tabs: &mut TabContainer) -> Rc<RefCell<WindowTitle>> {
        let mut title = WindowTitle::new(tabs.config().show_full_title_path);
        title.refresh(&tabs.query());

        let state = Rc::new(RefCell::new(title));
        let sink = Rc::clone(&state);
        tabs.subscribe(move |event: &TabEvent, view: &dyn TabQuery| {
            sink.borrow_mut().on_event(event, view)
        });
        state
    }

    pub fn on_event(&mut self, event: &TabEvent, tabs: &dyn TabQuery) {
        let selected = tabs.selected();
        let relevant = match event {
            TabEvent::Selected { .. } | TabEvent::Removed { .. } => true,
            TabEvent::NavigationCommitted { tab, .. } => selected == Some(*tab),
            TabEvent::Updated {
                tab,
                property: PropertyKind::Name,
            } => selected == Some(*tab),
            _ => false,
        };

        if relevant {
            self.refresh(tabs);
        }
    }

    fn refresh(&mut self, tabs: &dyn TabQuery) {
        let title = match tabs.selected() {
            Some(tab) => {
                let full_path = if self.show_full_path {
                    tabs.location(tab).map(|location| location.to_string())
                } else {
                    None
                };
                let name = full_path
                    .or_else(|| tabs.display_name(tab))
                    .unwrap_or_default();
                format!("{} - {}", name, APP_NAME)
            }
            None => APP_NAME.to_string(),
        };

        if title != self.title {
            tracing::debug!("Window title: {}", title);
            self.title = title;
            self.updates += 1;
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// How many times the title actually changed.
    #[must_use]
    pub fn updates(&self) -> usize {
        self.updates
    }
}
