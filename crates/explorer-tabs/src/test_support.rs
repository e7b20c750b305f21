//! Mock collaborators shared by the unit tests.

use explorer_tabs_core::{
    BrowserFactory, BrowserSession, FolderInstance, IconReply, IconRequest, IconResolver,
    IconResult, Location, NavigationError, NavigationProgress, SystemIcon, TabConfig, TabEvent,
    TabQuery, ViewSettings,
};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

pub const DEFAULT_FOLDER_ICON: SystemIcon = SystemIcon(3);

/// Locations that fail to resolve, shared by every session of a world.
pub type Missing = Rc<RefCell<HashSet<Location>>>;

pub struct MockBrowser {
    pub location: Option<Location>,
    pub instance: u64,
    pub view: ViewSettings,
    pub missing: Missing,
    pub progress: NavigationProgress,
    pub browse_calls: Rc<Cell<usize>>,
}

impl MockBrowser {
    pub fn new() -> Self {
        MockBrowser {
            location: None,
            instance: 0,
            view: ViewSettings::default(),
            missing: Rc::default(),
            progress: NavigationProgress::Completed,
            browse_calls: Rc::default(),
        }
    }
}

impl BrowserSession for MockBrowser {
    fn browse_to(&mut self, location: &Location) -> Result<NavigationProgress, NavigationError> {
        self.browse_calls.set(self.browse_calls.get() + 1);
        if self.missing.borrow().contains(location) {
            return Err(NavigationError::NotFound(location.clone()));
        }
        self.location = Some(location.clone());
        self.instance += 1;
        Ok(self.progress)
    }

    fn current_location(&self) -> Option<Location> {
        self.location.clone()
    }

    fn folder_instance(&self) -> FolderInstance {
        FolderInstance(self.instance)
    }

    fn display_name(&self) -> String {
        match &self.location {
            Some(location) => location
                .as_str()
                .rsplit('/')
                .find(|part| !part.is_empty())
                .unwrap_or("/")
                .to_string(),
            None => String::new(),
        }
    }

    fn export_view_settings(&self) -> ViewSettings {
        self.view.clone()
    }

    fn refresh(&mut self) -> Result<NavigationProgress, NavigationError> {
        match self.location.clone() {
            Some(location) if self.missing.borrow().contains(&location) => {
                Err(NavigationError::NotFound(location))
            }
            Some(_) => {
                self.instance += 1;
                Ok(self.progress)
            }
            None => Err(NavigationError::Unavailable("never browsed".to_string())),
        }
    }

    fn parent_location(&self) -> Option<Location> {
        let path = self.location.as_ref()?.as_str().trim_end_matches('/');
        let cut = path.rfind('/')?;
        Some(Location::new(if cut == 0 { "/" } else { &path[..cut] }))
    }
}

/// Shared switches for every collaborator a test container talks to.
#[derive(Clone, Default)]
pub struct MockWorld {
    pub missing: Missing,
    pub progress: Rc<Cell<Option<NavigationProgress>>>,
    pub sessions_created: Rc<Cell<usize>>,
    pub browse_calls: Rc<Cell<usize>>,
    pub icons: Rc<RefCell<HashMap<Location, SystemIcon>>>,
    pub queued: Rc<RefCell<Vec<(IconRequest, IconReply)>>>,
}

impl MockWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn make_missing(&self, path: &str) {
        self.missing.borrow_mut().insert(Location::new(path));
    }

    pub fn factory(&self) -> impl BrowserFactory + 'static {
        let world = self.clone();
        move |view: Option<ViewSettings>| -> Box<dyn BrowserSession> {
            world.sessions_created.set(world.sessions_created.get() + 1);
            let mut browser = MockBrowser::new();
            browser.view = view.unwrap_or_default();
            browser.missing = Rc::clone(&world.missing);
            browser.browse_calls = Rc::clone(&world.browse_calls);
            if let Some(progress) = world.progress.get() {
                browser.progress = progress;
            }
            Box::new(browser)
        }
    }

    pub fn resolver(&self) -> MockResolver {
        MockResolver {
            icons: Rc::clone(&self.icons),
            queued: Rc::clone(&self.queued),
        }
    }

    /// Answers every queued lookup with `icon`, oldest first.
    pub fn complete_lookups(&self, icon: SystemIcon) -> usize {
        let queued: Vec<_> = self.queued.borrow_mut().drain(..).collect();
        let count = queued.len();
        for (request, reply) in queued {
            reply.send(IconResult::for_request(&request, icon));
        }
        count
    }

    pub fn take_lookups(&self) -> Vec<(IconRequest, IconReply)> {
        self.queued.borrow_mut().drain(..).collect()
    }
}

pub struct MockResolver {
    pub icons: Rc<RefCell<HashMap<Location, SystemIcon>>>,
    pub queued: Rc<RefCell<Vec<(IconRequest, IconReply)>>>,
}

impl IconResolver for MockResolver {
    fn default_folder_icon(&self) -> SystemIcon {
        DEFAULT_FOLDER_ICON
    }

    fn cached_icon(&self, location: &Location) -> Option<SystemIcon> {
        self.icons.borrow().get(location).copied()
    }

    fn queue_lookup(&mut self, request: IconRequest, reply: IconReply) {
        self.queued.borrow_mut().push((request, reply));
    }
}

/// Config whose fallback directories are plain test paths.
pub fn test_config() -> TabConfig {
    TabConfig {
        default_tab_directory: Location::new("/home/user"),
        default_tab_directory_static: Location::new("/"),
        ..TabConfig::default()
    }
}

/// Collects every published event.
pub fn event_log() -> (
    Rc<RefCell<Vec<TabEvent>>>,
    impl FnMut(&TabEvent, &dyn TabQuery) + 'static,
) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    (log, move |event: &TabEvent, _: &dyn TabQuery| {
        sink.borrow_mut().push(event.clone())
    })
}
