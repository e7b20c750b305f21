//! Event-driven views of the tab set.
//!
//! Each observer subscribes to a [`TabContainer`](crate::TabContainer)
//! and keeps one piece of surrounding UI state in step with it.

pub mod tab_bar;
pub mod taskbar;
pub mod window_title;

pub use tab_bar::TabBarVisibility;
pub use taskbar::{TabProxy, TaskbarProxies};
pub use window_title::{WindowTitle, APP_NAME};
