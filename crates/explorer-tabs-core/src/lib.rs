//! # explorer-tabs-core
//!
//! Core types and collaborator contracts for the Explorer++ tab subsystem.
//!
//! This crate holds the vocabulary shared between the tab container
//! (`explorer-tabs`) and the things around it: the navigation engine that
//! browses folders, the icon resolver, the persistence layer and the
//! observers that react to tab events.
//!
//! ## Core Abstractions
//!
//! - [`BrowserSession`] / [`BrowserFactory`] - per-tab navigation collaborator
//! - [`IconResolver`] / [`IconReply`] - folder icon lookups and their hand-off
//! - [`TabEvent`] / [`EventBus`] / [`TabQuery`] - synchronous event fan-out
//! - [`TabCommand`] - user-level commands for the tab strip
//! - [`TabConfig`] - explicitly passed configuration
//! - [`SessionRecord`] - saved tab strips
//! - [`TabError`] - error types for container operations
//!
//! ## Example
//!
//! ```
//! use explorer_tabs_core::{EventBus, LockState, TabEvent, TabQuery};
//!
//! let mut bus = EventBus::new();
//! bus.subscribe(|event: &TabEvent, tabs: &dyn TabQuery| {
//!     if let TabEvent::Created { tab, .. } = event {
//!         println!("tab {} created, {} open", tab, tabs.tab_count());
//!     }
//! });
//!
//! assert_eq!(LockState::Locked.toggled(LockState::Locked), LockState::NotLocked);
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod icon;
pub mod location;
pub mod navigation;
pub mod session;
pub mod tab;

pub use command::TabCommand;
pub use config::{DropConfig, TabConfig};
pub use error::{NavigationError, TabError, TabResult};
pub use event::{EventBus, SubscriptionId, TabEvent, TabQuery};
pub use icon::{
    icon_channel, DefaultIcon, IconReply, IconRequest, IconResolver, IconResult, IconSlot,
    SystemIcon,
};
pub use location::{FolderInstance, Location, ViewMode, ViewSettings};
pub use navigation::{BrowserFactory, BrowserSession, NavigationProgress};
pub use session::{SessionRecord, TabRestoreRecord};
pub use tab::{LockState, PropertyKind, TabId};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_exports() {
        let _: TabId = 0;
        let _ = LockState::NotLocked;
        let _ = PropertyKind::Name;
        let _ = TabError::TabNotFound(0);
        let _ = IconSlot(0);
        let _ = DefaultIcon::Lock;
        let _ = TabConfig::default();
        let _ = SessionRecord::default();
        let _ = TabCommand::NewTab;
    }

    #[test]
    fn test_event_exports() {
        let _ = TabEvent::Removed { tab: 1 };
        let _ = EventBus::new();
        let _ = icon_channel();
    }

    #[test]
    fn test_tab_result_usage() {
        fn lookup(found: bool) -> TabResult<u32> {
            if found {
                Ok(42)
            } else {
                Err(TabError::TabNotFound(1))
            }
        }

        assert_eq!(lookup(true).ok(), Some(42));
        assert!(lookup(false).is_err());
    }
}
