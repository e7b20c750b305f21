//! Folder icons for filesystem tabs.
//!
//! Lookups probe the folder on the blocking thread pool and report back
//! through the container's [`IconReply`]. Answers are cached per location.

use explorer_tabs_core::{IconReply, IconRequest, IconResolver, IconResult, Location, SystemIcon};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const FOLDER_ICON: SystemIcon = SystemIcon(3);
pub const HIDDEN_FOLDER_ICON: SystemIcon = SystemIcon(4);
pub const DRIVE_ICON: SystemIcon = SystemIcon(8);
pub const REPOSITORY_ICON: SystemIcon = SystemIcon(21);
pub const HOME_ICON: SystemIcon = SystemIcon(117);

/// Short label for an icon, used when printing the strip.
#[must_use]
pub fn icon_name(icon: SystemIcon) -> &'static str {
    match icon {
        FOLDER_ICON => "folder",
        HIDDEN_FOLDER_ICON => "hidden",
        DRIVE_ICON => "drive",
        REPOSITORY_ICON => "repo",
        HOME_ICON => "home",
        _ => "custom",
    }
}

type IconCache = Arc<Mutex<HashMap<Location, SystemIcon>>>;

pub struct FsIconResolver {
    home: Option<PathBuf>,
    cache: IconCache,
}

impl FsIconResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::with_home(dirs::home_dir().and_then(|home| home.canonicalize().ok()))
    }

    #[must_use]
    pub fn with_home(home: Option<PathBuf>) -> Self {
        FsIconResolver {
            home,
            cache: Arc::default(),
        }
    }
}

impl Default for FsIconResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Picks the icon for a folder from what is on disk.
fn probe(path: &Path, home: Option<&Path>) -> SystemIcon {
    if path.parent().is_none() {
        return DRIVE_ICON;
    }
    if home == Some(path) {
        return HOME_ICON;
    }
    if path
        .file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
    {
        return HIDDEN_FOLDER_ICON;
    }
    if path.join(".git").exists() {
        return REPOSITORY_ICON;
    }
    FOLDER_ICON
}

fn resolve(request: IconRequest, home: Option<PathBuf>, cache: IconCache, reply: IconReply) {
    let icon = probe(Path::new(request.location.as_str()), home.as_deref());
    cache.lock().insert(request.location.clone(), icon);
    tracing::trace!("Icon for {} is {}", request.location, icon_name(icon));
    reply.send(IconResult::for_request(&request, icon));
}

impl IconResolver for FsIconResolver {
    fn default_folder_icon(&self) -> SystemIcon {
        FOLDER_ICON
    }

    fn cached_icon(&self, location: &Location) -> Option<SystemIcon> {
        self.cache.lock().get(location).copied()
    }

    fn queue_lookup(&mut self, request: IconRequest, reply: IconReply) {
        let home = self.home.clone();
        let cache = Arc::clone(&self.cache);

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(move || resolve(request, home, cache, reply));
            }
            Err(_) => {
                tracing::debug!("No runtime for icon lookup; probing inline");
                resolve(request, home, cache, reply);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use explorer_tabs_core::{icon_channel, FolderInstance};
    use std::fs;
    use tempfile::TempDir;

    fn request(path: &Path) -> IconRequest {
        IconRequest {
            tab: 1,
            folder_instance: FolderInstance(9),
            location: Location::from_path(path),
        }
    }

    #[test]
    fn test_probe() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let repo = root.join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();
        let hidden = root.join(".config");
        fs::create_dir(&hidden).unwrap();

        assert_eq!(probe(Path::new("/"), None), DRIVE_ICON);
        assert_eq!(probe(root, Some(root)), HOME_ICON);
        assert_eq!(probe(&repo, None), REPOSITORY_ICON);
        assert_eq!(probe(&hidden, None), HIDDEN_FOLDER_ICON);
        assert_eq!(probe(root, None), FOLDER_ICON);
    }

    #[tokio::test]
    async fn test_lookup_replies_and_caches() {
        let temp_dir = TempDir::new().unwrap();
        let mut resolver = FsIconResolver::with_home(Some(temp_dir.path().to_path_buf()));
        let (reply, mut results) = icon_channel();

        let request = request(temp_dir.path());
        assert_eq!(resolver.cached_icon(&request.location), None);
        resolver.queue_lookup(request.clone(), reply);

        let result = results.recv().await.unwrap();
        assert_eq!(result.tab, 1);
        assert_eq!(result.folder_instance, FolderInstance(9));
        assert_eq!(result.icon, HOME_ICON);
        assert_eq!(resolver.cached_icon(&request.location), Some(HOME_ICON));
    }

    #[test]
    fn test_lookup_without_runtime() {
        let temp_dir = TempDir::new().unwrap();
        let mut resolver = FsIconResolver::with_home(None);
        let (reply, mut results) = icon_channel();

        resolver.queue_lookup(request(temp_dir.path()), reply);
        assert_eq!(results.try_recv().unwrap().icon, FOLDER_ICON);
    }

    #[test]
    fn test_icon_names() {
        assert_eq!(icon_name(REPOSITORY_ICON), "repo");
        assert_eq!(icon_name(SystemIcon(999)), "custom");
    }
}
