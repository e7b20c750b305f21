//! Browser sessions backed by the local filesystem.

use explorer_tabs_core::{
    BrowserFactory, BrowserSession, FolderInstance, Location, NavigationError, NavigationProgress,
    ViewSettings,
};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Visit tokens are unique across every session in the process.
static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

fn next_instance() -> FolderInstance {
    FolderInstance(NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed))
}

/// One tab's view of a directory.
#[derive(Debug)]
pub struct FsBrowser {
    current: Option<PathBuf>,
    instance: FolderInstance,
    view: ViewSettings,
    entries: Vec<String>,
}

impl FsBrowser {
    #[must_use]
    pub fn new(view: ViewSettings) -> Self {
        FsBrowser {
            current: None,
            instance: FolderInstance::default(),
            view,
            entries: Vec::new(),
        }
    }

    /// Resolves `location` to an existing directory. `~` expands to the
    /// home directory and relative paths start at the current folder.
    fn resolve(&self, location: &Location) -> Result<PathBuf, NavigationError> {
        let raw = location.as_str();
        let path = match raw.strip_prefix('~') {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => {
                let home = dirs::home_dir().ok_or_else(|| {
                    NavigationError::Unavailable("no home directory".to_string())
                })?;
                home.join(rest.trim_start_matches('/'))
            }
            _ => PathBuf::from(raw),
        };
        let path = match &self.current {
            Some(current) if path.is_relative() => current.join(path),
            _ => path,
        };

        let canonical = path
            .canonicalize()
            .map_err(|err| navigation_error(location, &err))?;
        if !canonical.is_dir() {
            return Err(NavigationError::NotAFolder(location.clone()));
        }
        Ok(canonical)
    }

    /// Reads the folder's entries, sorted folders first.
    fn enumerate(&mut self, path: &Path) -> Result<(), NavigationError> {
        let location = Location::from_path(path);
        let mut items: Vec<(bool, String)> = std::fs::read_dir(path)
            .map_err(|err| navigation_error(&location, &err))?
            .filter_map(|e| e.ok())
            .map(|e| {
                let name = e.file_name().to_string_lossy().into_owned();
                (!e.path().is_dir(), name)
            })
            .filter(|(_, name)| self.view.show_hidden || !name.starts_with('.'))
            .collect();

        items.sort_by_key(|(is_file, name)| (*is_file, name.to_lowercase()));
        if !self.view.sort_ascending {
            items.reverse();
        }

        self.entries = items.into_iter().map(|(_, name)| name).collect();
        tracing::trace!("Enumerated {} entries in {}", self.entries.len(), location);
        Ok(())
    }
}

fn navigation_error(location: &Location, err: &io::Error) -> NavigationError {
    match err.kind() {
        io::ErrorKind::NotFound => NavigationError::NotFound(location.clone()),
        io::ErrorKind::PermissionDenied => NavigationError::AccessDenied(location.clone()),
        _ => NavigationError::Unavailable(format!("{}: {}", location, err)),
    }
}

impl BrowserSession for FsBrowser {
    fn browse_to(&mut self, location: &Location) -> Result<NavigationProgress, NavigationError> {
        let path = self.resolve(location)?;
        self.enumerate(&path)?;
        self.current = Some(path);
        self.instance = next_instance();
        Ok(NavigationProgress::Completed)
    }

    fn current_location(&self) -> Option<Location> {
        self.current.as_deref().map(Location::from_path)
    }

    fn folder_instance(&self) -> FolderInstance {
        self.instance
    }

    fn display_name(&self) -> String {
        match &self.current {
            Some(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            None => String::new(),
        }
    }

    fn export_view_settings(&self) -> ViewSettings {
        self.view.clone()
    }

    fn refresh(&mut self) -> Result<NavigationProgress, NavigationError> {
        let path = self
            .current
            .clone()
            .ok_or_else(|| NavigationError::Unavailable("no folder to refresh".to_string()))?;
        if !path.is_dir() {
            return Err(NavigationError::NotFound(Location::from_path(&path)));
        }
        self.enumerate(&path)?;
        self.instance = next_instance();
        Ok(NavigationProgress::Completed)
    }

    fn parent_location(&self) -> Option<Location> {
        self.current
            .as_deref()
            .and_then(Path::parent)
            .map(Location::from_path)
    }

    fn entries(&self) -> Vec<String> {
        self.entries.clone()
    }
}

/// Factory handing out a fresh [`FsBrowser`] per tab.
pub fn factory() -> impl BrowserFactory + 'static {
    |view: Option<ViewSettings>| -> Box<dyn BrowserSession> {
        Box::new(FsBrowser::new(view.unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn browse(browser: &mut FsBrowser, path: &Path) -> Result<NavigationProgress, NavigationError> {
        browser.browse_to(&Location::from_path(path))
    }

    #[test]
    fn test_browse_enumerates_folders_first() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "a").unwrap();
        fs::create_dir(temp_dir.path().join("zeta")).unwrap();
        fs::write(temp_dir.path().join(".hidden"), "").unwrap();

        let mut browser = FsBrowser::new(ViewSettings::default());
        browse(&mut browser, temp_dir.path()).unwrap();

        assert_eq!(browser.entries(), ["zeta", "a.txt"]);
        let expected = Location::from_path(&temp_dir.path().canonicalize().unwrap());
        assert_eq!(browser.current_location(), Some(expected));
    }

    #[test]
    fn test_show_hidden() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(".hidden"), "").unwrap();

        let view = ViewSettings {
            show_hidden: true,
            ..ViewSettings::default()
        };
        let mut browser = FsBrowser::new(view);
        browse(&mut browser, temp_dir.path()).unwrap();
        assert_eq!(browser.entries(), [".hidden"]);
    }

    #[test]
    fn test_errors_leave_location_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        let mut browser = FsBrowser::new(ViewSettings::default());
        browse(&mut browser, temp_dir.path()).unwrap();
        let before = browser.current_location();
        let instance = browser.folder_instance();

        assert!(matches!(
            browse(&mut browser, &file),
            Err(NavigationError::NotAFolder(_))
        ));
        assert!(matches!(
            browse(&mut browser, &temp_dir.path().join("missing")),
            Err(NavigationError::NotFound(_))
        ));
        assert_eq!(browser.current_location(), before);
        assert_eq!(browser.folder_instance(), instance);
    }

    #[test]
    fn test_relative_paths_and_parent() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("child")).unwrap();

        let mut browser = FsBrowser::new(ViewSettings::default());
        browse(&mut browser, temp_dir.path()).unwrap();
        browser.browse_to(&Location::new("child")).unwrap();
        assert_eq!(browser.display_name(), "child");

        let parent = browser.parent_location().unwrap();
        assert_eq!(
            parent,
            Location::from_path(&temp_dir.path().canonicalize().unwrap())
        );
    }

    #[test]
    fn test_refresh_changes_instance() {
        let temp_dir = TempDir::new().unwrap();
        let mut browser = FsBrowser::new(ViewSettings::default());
        assert!(browser.refresh().is_err());

        browse(&mut browser, temp_dir.path()).unwrap();
        let first = browser.folder_instance();
        fs::write(temp_dir.path().join("new.txt"), "").unwrap();
        browser.refresh().unwrap();

        assert_ne!(browser.folder_instance(), first);
        assert_eq!(browser.entries(), ["new.txt"]);
    }

    #[test]
    fn test_refresh_of_vanished_folder() {
        let temp_dir = TempDir::new().unwrap();
        let gone = temp_dir.path().join("gone");
        fs::create_dir(&gone).unwrap();

        let mut browser = FsBrowser::new(ViewSettings::default());
        browse(&mut browser, &gone).unwrap();
        fs::remove_dir(&gone).unwrap();

        assert!(matches!(
            browser.refresh(),
            Err(NavigationError::NotFound(_))
        ));
    }

    #[test]
    fn test_home_expansion() {
        let Some(home) = dirs::home_dir().and_then(|home| home.canonicalize().ok()) else {
            return;
        };
        let mut browser = FsBrowser::new(ViewSettings::default());
        if browser.browse_to(&Location::new("~")).is_ok() {
            assert_eq!(browser.current_location(), Some(Location::from_path(&home)));
        }
    }
}
