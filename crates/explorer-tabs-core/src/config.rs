//! Tab container configuration.
//!
//! A [`TabConfig`] is constructed by the host (usually deserialized from
//! the user's config file) and passed into the container; nothing reads
//! settings from global state.

use crate::location::Location;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Behaviour switches for the tab container and its observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabConfig {
    /// Insert new tabs right after the selected one instead of at the end.
    pub open_new_tab_next_to_current: bool,
    /// Closing the only tab closes the application instead of doing nothing.
    pub close_main_window_on_tab_close: bool,
    /// Directory for new tabs and the first navigation fallback.
    pub default_tab_directory: Location,
    /// Last navigation fallback; expected to always resolve.
    pub default_tab_directory_static: Location,
    /// Show the tab bar even with a single tab.
    pub always_show_tab_bar: bool,
    pub double_click_tab_close: bool,
    pub show_taskbar_thumbnails: bool,
    /// Put the full location in the window title instead of the tab name.
    pub show_full_title_path: bool,
    /// How many closed tabs can be reopened.
    pub closed_tab_capacity: usize,
    pub drop: DropConfig,
}

/// Timings for the drag-and-drop hover affordances on the tab strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropConfig {
    pub switch_tab_delay_ms: u64,
    pub scroll_delay_ms: u64,
    /// Width of the edge zones that scroll the strip, in pixels.
    pub scroll_margin: i32,
}

impl DropConfig {
    #[must_use]
    pub fn switch_tab_delay(&self) -> Duration {
        Duration::from_millis(self.switch_tab_delay_ms)
    }

    #[must_use]
    pub fn scroll_delay(&self) -> Duration {
        Duration::from_millis(self.scroll_delay_ms)
    }
}

impl Default for DropConfig {
    fn default() -> Self {
        DropConfig {
            switch_tab_delay_ms: 500,
            scroll_delay_ms: 1000,
            scroll_margin: 40,
        }
    }
}

impl Default for TabConfig {
    fn default() -> Self {
        TabConfig {
            open_new_tab_next_to_current: false,
            close_main_window_on_tab_close: true,
            default_tab_directory: default_home(),
            default_tab_directory_static: default_root(),
            always_show_tab_bar: true,
            double_click_tab_close: true,
            show_taskbar_thumbnails: true,
            show_full_title_path: false,
            closed_tab_capacity: 25,
            drop: DropConfig::default(),
        }
    }
}

fn default_home() -> Location {
    std::env::var_os(if cfg!(windows) { "USERPROFILE" } else { "HOME" })
        .map(|home| Location::new(home.to_string_lossy().into_owned()))
        .unwrap_or_else(default_root)
}

fn default_root() -> Location {
    if cfg!(windows) {
        Location::new("C:\\")
    } else {
        Location::new("/")
    }
}
