//! Icon collaborator contract and the hand-off used to return
//! asynchronously resolved icons to the UI thread.

use crate::location::{FolderInstance, Location};
use crate::tab::TabId;
use tokio::sync::mpsc;

/// Index of an icon in the system (shell) image list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SystemIcon(pub u32);

/// Index of a slot in the tab strip's own image list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IconSlot(pub usize);

/// The icons that are pre-populated into the tab image list and shared
/// by every tab that shows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultIcon {
    Lock,
    GenericFolder,
}

/// A queued folder icon lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRequest {
    pub tab: TabId,
    /// Folder visit the lookup was issued for; completions for an older
    /// visit are discarded.
    pub folder_instance: FolderInstance,
    pub location: Location,
}

/// The answer to an [`IconRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconResult {
    pub tab: TabId,
    pub folder_instance: FolderInstance,
    pub icon: SystemIcon,
}

impl IconResult {
    /// Builds the result for `request`.
    #[must_use]
    pub fn for_request(request: &IconRequest, icon: SystemIcon) -> Self {
        IconResult {
            tab: request.tab,
            folder_instance: request.folder_instance,
            icon,
        }
    }
}

/// Thread-safe sender a resolver uses to hand completed lookups back.
///
/// Cloning is cheap; every clone feeds the same container.
#[derive(Debug, Clone)]
pub struct IconReply {
    sender: mpsc::UnboundedSender<IconResult>,
}

impl IconReply {
    /// Sends a completed lookup. Returns false if the receiving container
    /// has been dropped, in which case the result is simply discarded.
    pub fn send(&self, result: IconResult) -> bool {
        match self.sender.send(result) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!("Dropping icon result for closed container: {:?}", err.0);
                false
            }
        }
    }
}

/// Creates the reply/receiver pair used between a resolver and the
/// container.
#[must_use]
pub fn icon_channel() -> (IconReply, mpsc::UnboundedReceiver<IconResult>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (IconReply { sender }, receiver)
}

/// Resolves folder icons, possibly off-thread.
pub trait IconResolver {
    /// The system icon used for plain folders. Results equal to this map
    /// onto the shared generic-folder slot rather than a fresh one.
    fn default_folder_icon(&self) -> SystemIcon;

    /// An icon already known for `location`, without probing.
    fn cached_icon(&self, location: &Location) -> Option<SystemIcon>;

    /// Queues a lookup. The resolver must eventually send at most one
    /// [`IconResult`] for the request through `reply`.
    fn queue_lookup(&mut self, request: IconRequest, reply: IconReply);
}
