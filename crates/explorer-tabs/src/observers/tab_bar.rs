//! Shows or hides the tab bar as tabs come and go.

use crate::container::TabContainer;
use explorer_tabs_core::{TabEvent, TabQuery};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone)]
pub struct TabBarVisibility {
    always_show: bool,
    visible: bool,
}

impl TabBarVisibility {
    #[must_use]
    pub fn new(always_show: bool) -> Self {
        TabBarVisibility {
            always_show,
            visible: always_show,
        }
    }

    pub fn attach(tabs: &mut TabContainer) -> Rc<RefCell<TabBarVisibility>> {
        let mut bar = TabBarVisibility::new(tabs.config().always_show_tab_bar);
        bar.update(tabs.len());

        let state = Rc::new(RefCell::new(bar));
        let sink = Rc::clone(&state);
        tabs.subscribe(move |event: &TabEvent, view: &dyn TabQuery| {
            if matches!(event, TabEvent::Created { .. } | TabEvent::Removed { .. }) {
                sink.borrow_mut().update(view.tab_count());
            }
        });
        state
    }

    fn update(&mut self, tab_count: usize) {
        let visible = self.always_show || tab_count > 1;
        if visible != self.visible {
            tracing::debug!("Tab bar {}", if visible { "shown" } else { "hidden" });
            self.visible = visible;
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::TabSettings;
    use crate::test_support::{test_config, MockWorld};
    use explorer_tabs_core::{Location, TabConfig};

    fn container(always_show: bool) -> TabContainer {
        let world = MockWorld::new();
        let config = TabConfig {
            always_show_tab_bar: always_show,
            ..test_config()
        };
        TabContainer::new(config, world.factory(), world.resolver())
    }

    #[test]
    fn test_hidden_with_single_tab() {
        let mut tabs = container(false);
        let bar = TabBarVisibility::attach(&mut tabs);

        tabs.create_tab(Location::new("/a"), TabSettings::foreground());
        assert!(!bar.borrow().is_visible());

        let b = tabs
            .create_tab(Location::new("/b"), TabSettings::foreground())
            .id;
        assert!(bar.borrow().is_visible());

        tabs.close_tab(b);
        assert!(!bar.borrow().is_visible());
    }

    #[test]
    fn test_always_shown() {
        let mut tabs = container(true);
        let bar = TabBarVisibility::attach(&mut tabs);
        assert!(bar.borrow().is_visible());

        tabs.create_tab(Location::new("/a"), TabSettings::foreground());
        assert!(bar.borrow().is_visible());
    }
}
