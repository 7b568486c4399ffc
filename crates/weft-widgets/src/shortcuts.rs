//! Global keyboard shortcuts.
//!
//! The registry is consulted before normal key dispatch: a registered,
//! enabled shortcut fully consumes its key press. Like the focus manager
//! it is a field of the runtime context, not process state.

use std::collections::HashMap;

use crate::keyboard::KeyEvent;
use crate::queue::EventSender;

/// Handle identifying one shortcut registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShortcutId(u64);

impl ShortcutId {
    /// Returns the raw id value.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

/// Callback invoked when a shortcut fires.
///
/// Actions communicate with the tree the same way producer threads do:
/// by enqueueing events through the sender.
pub type ShortcutAction = Box<dyn FnMut(&EventSender) + Send>;

struct Entry {
    id: ShortcutId,
    action: Option<ShortcutAction>,
}

/// Key-to-action registry consulted ahead of widget key dispatch.
#[derive(Default)]
pub struct ShortcutRegistry {
    entries: HashMap<KeyEvent, Entry>,
    enabled: bool,
    next_id: u64,
}

impl ShortcutRegistry {
    /// Creates an empty, enabled registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            enabled: true,
            next_id: 1,
        }
    }

    /// Registers a key, returning the handle used to attach its action.
    ///
    /// Re-registering a key replaces the previous binding.
    pub fn add(&mut self, key: KeyEvent) -> ShortcutId {
        let id = ShortcutId(self.next_id);
        self.next_id += 1;
        self.entries.insert(key, Entry { id, action: None });
        id
    }

    /// Attaches the action run when `key` fires.
    ///
    /// Returns `false` if the key is not registered.
    pub fn on_activate(&mut self, key: KeyEvent, action: ShortcutAction) -> bool {
        match self.entries.get_mut(&key) {
            Some(entry) => {
                entry.action = Some(action);
                true
            }
            None => false,
        }
    }

    /// Removes a key binding. Returns whether it existed.
    pub fn remove(&mut self, key: KeyEvent) -> bool {
        self.entries.remove(&key).is_some()
    }

    /// Returns the handle registered for `key`.
    pub fn get(&self, key: KeyEvent) -> Option<ShortcutId> {
        self.entries.get(&key).map(|e| e.id)
    }

    /// Returns the number of registered keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no keys are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Enables shortcut matching.
    pub fn enable_all(&mut self) {
        self.enabled = true;
    }

    /// Disables shortcut matching; keys pass through to normal dispatch.
    pub fn disable_all(&mut self) {
        self.enabled = false;
    }

    /// Returns whether matching is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Consumes `key` if it matches a registered shortcut.
    ///
    /// Runs the attached action (if any) and returns `true` when the key
    /// press is fully consumed.
    pub fn try_consume(&mut self, key: KeyEvent, sender: &EventSender) -> bool {
        if !self.enabled {
            return false;
        }
        let Some(entry) = self.entries.get_mut(&key) else {
            return false;
        };
        tracing::debug!(%key, "shortcut consumed key press");
        if let Some(action) = entry.action.as_mut() {
            action(sender);
        }
        true
    }
}
