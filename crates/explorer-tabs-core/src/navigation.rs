//! Navigation collaborator contract.
//!
//! Each tab owns one [`BrowserSession`]. The container drives it and relays
//! what happens as navigation events; it never looks inside the session's
//! browse state beyond the accessors below.

use crate::error::NavigationError;
use crate::location::{FolderInstance, Location, ViewSettings};

/// How far a successful browse got before returning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationProgress {
    /// The location was resolved and the tab now points at it. Enumeration
    /// continues in the background and is reported later through
    /// `notify_navigation_completed`.
    Committed,
    /// The location was resolved and fully enumerated.
    Completed,
}

/// One tab's browsing engine.
///
/// Sessions are used from the UI thread only, so there is no `Send`
/// requirement.
pub trait BrowserSession {
    /// Browses to `location`.
    ///
    /// # Errors
    ///
    /// Returns a [`NavigationError`] when the location cannot be resolved.
    /// The session's current location is left unchanged in that case.
    fn browse_to(&mut self, location: &Location) -> Result<NavigationProgress, NavigationError>;

    /// The location the session currently shows, `None` until the first
    /// successful browse.
    fn current_location(&self) -> Option<Location>;

    /// Token for the current visit; changes on every successful browse
    /// and refresh.
    fn folder_instance(&self) -> FolderInstance;

    /// Name shown on the tab when it has no custom name.
    fn display_name(&self) -> String;

    /// Current view configuration, used when duplicating or preserving
    /// the tab.
    fn export_view_settings(&self) -> ViewSettings;

    /// Re-reads the current location.
    ///
    /// # Errors
    ///
    /// Returns a [`NavigationError`] if the location vanished.
    fn refresh(&mut self) -> Result<NavigationProgress, NavigationError>;

    /// The parent of the current location, if there is one.
    fn parent_location(&self) -> Option<Location>;

    /// Names in the current folder, in display order. Empty for sessions
    /// that do not enumerate.
    fn entries(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Creates browser sessions for new tabs.
pub trait BrowserFactory {
    /// Creates an unresolved session. `view` seeds the view configuration
    /// when duplicating or restoring a tab.
    fn create(&mut self, view: Option<ViewSettings>) -> Box<dyn BrowserSession>;
}

impl<F> BrowserFactory for F
where
    F: FnMut(Option<ViewSettings>) -> Box<dyn BrowserSession>,
{
    fn create(&mut self, view: Option<ViewSettings>) -> Box<dyn BrowserSession> {
        self(view)
    }
}
