//! The tab strip's image list.
//!
//! Two slots are pre-populated with the shared default icons and live
//! forever. Every other slot holds a copy of one folder icon and belongs
//! to exactly one tab; ownership is tracked by the container, not here.

use explorer_tabs_core::{DefaultIcon, IconSlot, SystemIcon};

const LOCK_SLOT: IconSlot = IconSlot(0);
const GENERIC_FOLDER_SLOT: IconSlot = IconSlot(1);
const DEFAULT_SLOT_COUNT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotContent {
    Default(DefaultIcon),
    Folder(SystemIcon),
    Free,
}

/// Allocates and recycles image-list slots.
///
/// # Example
///
/// ```
/// use explorer_tabs::IconSlotAllocator;
/// use explorer_tabs_core::{DefaultIcon, SystemIcon};
///
/// let mut slots = IconSlotAllocator::new();
/// let folder = slots.acquire_for_folder(SystemIcon(42));
/// assert!(!slots.is_default(folder));
///
/// slots.release(folder);
/// slots.release(slots.default_slot(DefaultIcon::Lock)); // no-op
/// assert_eq!(slots.folder_slots_in_use(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct IconSlotAllocator {
    slots: Vec<SlotContent>,
    /// Released slots, reused most recent first
    free: Vec<usize>,
}

impl IconSlotAllocator {
    /// Creates an image list holding only the default icons.
    #[must_use]
    pub fn new() -> Self {
        IconSlotAllocator {
            slots: vec![
                SlotContent::Default(DefaultIcon::Lock),
                SlotContent::Default(DefaultIcon::GenericFolder),
            ],
            free: Vec::new(),
        }
    }

    /// The shared slot for `kind`. Never fails and never needs releasing.
    #[must_use]
    pub fn default_slot(&self, kind: DefaultIcon) -> IconSlot {
        match kind {
            DefaultIcon::Lock => LOCK_SLOT,
            DefaultIcon::GenericFolder => GENERIC_FOLDER_SLOT,
        }
    }

    /// Copies `icon` into a fresh or recycled slot.
    pub fn acquire_for_folder(&mut self, icon: SystemIcon) -> IconSlot {
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index] = SlotContent::Folder(icon);
                index
            }
            None => {
                self.slots.push(SlotContent::Folder(icon));
                self.slots.len() - 1
            }
        };

        tracing::trace!("Icon slot {} now holds system icon {}", index, icon.0);
        IconSlot(index)
    }

    /// Frees a folder slot for reuse. Default slots are ignored.
    pub fn release(&mut self, slot: IconSlot) {
        if self.is_default(slot) {
            return;
        }

        match self.slots.get(slot.0) {
            Some(SlotContent::Folder(_)) => {
                self.slots[slot.0] = SlotContent::Free;
                self.free.push(slot.0);
                tracing::trace!("Released icon slot {}", slot.0);
            }
            Some(SlotContent::Free) => {
                tracing::warn!("Icon slot {} released twice", slot.0);
            }
            _ => {
                tracing::warn!("Release of unknown icon slot {}", slot.0);
            }
        }
    }

    #[must_use]
    pub fn is_default(&self, slot: IconSlot) -> bool {
        slot.0 < DEFAULT_SLOT_COUNT
    }

    /// The default icon a slot shows, if it is one of the shared slots.
    #[must_use]
    pub fn default_kind(&self, slot: IconSlot) -> Option<DefaultIcon> {
        match self.slots.get(slot.0) {
            Some(SlotContent::Default(kind)) => Some(*kind),
            _ => None,
        }
    }

    /// The system icon copied into a folder slot.
    #[must_use]
    pub fn folder_icon(&self, slot: IconSlot) -> Option<SystemIcon> {
        match self.slots.get(slot.0) {
            Some(SlotContent::Folder(icon)) => Some(*icon),
            _ => None,
        }
    }

    /// Number of folder slots currently handed out.
    #[must_use]
    pub fn folder_slots_in_use(&self) -> usize {
        self.slots
            .iter()
            .filter(|content| matches!(content, SlotContent::Folder(_)))
            .count()
    }

    /// Total size of the image list, free slots included.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

impl Default for IconSlotAllocator {
    fn default() -> Self {
        Self::new()
    }
}
