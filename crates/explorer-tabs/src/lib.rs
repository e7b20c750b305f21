//! # explorer-tabs
//!
//! Tab lifecycle management for Explorer++.
//!
//! [`TabContainer`] owns every open tab. It decides where new tabs go,
//! which tab becomes active when one closes, which icon each tab shows in
//! the strip, and how tabs are reordered by dragging. Every change is
//! published as a [`TabEvent`](explorer_tabs_core::TabEvent) to the
//! container's subscribers.
//!
//! ## Building Blocks
//!
//! - [`TabIndexMap`] - display order with O(1) id to index lookups
//! - [`SelectionHistory`] - previously selected tabs, most recent last
//! - [`IconSlotAllocator`] - shared icon slots with reserved defaults
//! - [`DragReorder`] / [`DropHover`] - pointer-driven strip interactions
//! - [`TabRestorer`] - recently closed tabs
//! - [`WindowTitle`], [`TabBarVisibility`], [`TaskbarProxies`] - observers
//!
//! ## Example
//!
//! ```ignore
//! use explorer_tabs::{TabContainer, TabSettings};
//! use explorer_tabs_core::{Location, TabConfig};
//!
//! let mut tabs = TabContainer::new(TabConfig::default(), factory, resolver);
//! let created = tabs.create_tab(Location::new("/srv"), TabSettings::foreground());
//! assert_eq!(tabs.selected_id(), Some(created.id));
//! ```

pub mod container;
pub mod drag;
pub mod drop_hover;
pub mod history;
pub mod icon_slots;
pub mod index_map;
pub mod observers;
pub mod record;
pub mod restorer;
mod view;

#[cfg(test)]
mod test_support;

pub use container::{CreatedTab, Placement, TabContainer, TabSettings};
pub use drag::{DragReorder, DragState, FixedWidthStrip, Point, Rect, TabStripGeometry};
pub use drop_hover::{DropHover, DropHoverAction, ScrollDirection};
pub use history::SelectionHistory;
pub use icon_slots::IconSlotAllocator;
pub use index_map::TabIndexMap;
pub use observers::{TabBarVisibility, TabProxy, TaskbarProxies, WindowTitle};
pub use record::TabRecord;
pub use restorer::{ClosedTab, TabRestorer};

pub use explorer_tabs_core;
