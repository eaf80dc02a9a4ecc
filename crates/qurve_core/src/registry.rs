//! Ordered callback registry
//!
//! Producers (grid, axes, series, tooltip overlay) register callbacks with a
//! chart and get back a [`Disposer`]. Entries live in a slot arena so a handle
//! stays valid while other entries come and go, and iteration follows
//! registration order so later producers paint on top of earlier ones.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Stable handle for a registry entry
    pub struct EntryId;
}

struct Entry<T> {
    label: String,
    value: T,
}

/// Registration-ordered arena of values.
pub struct Registry<T> {
    entries: SlotMap<EntryId, Entry<T>>,
    order: Vec<EntryId>,
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    /// Append an entry. `label` only shows up in logs.
    pub fn insert(&mut self, label: impl Into<String>, value: T) -> EntryId {
        let id = self.entries.insert(Entry {
            label: label.into(),
            value,
        });
        self.order.push(id);
        id
    }

    /// Remove an entry. Removing twice is a no-op.
    pub fn remove(&mut self, id: EntryId) -> Option<T> {
        let entry = self.entries.remove(id)?;
        self.order.retain(|k| *k != id);
        Some(entry.value)
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &str, &T)> + '_ {
        self.order.iter().filter_map(move |id| {
            self.entries
                .get(*id)
                .map(|e| (*id, e.label.as_str(), &e.value))
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

impl<T: Clone> Registry<T> {
    /// Copy out the current entries so callers can run them without holding
    /// a borrow on the registry.
    pub fn snapshot(&self) -> SmallVec<[(EntryId, String, T); 8]> {
        self.iter()
            .map(|(id, label, value)| (id, label.to_string(), value.clone()))
            .collect()
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Lifecycle handle returned by a registration.
///
/// Calling [`Disposer::dispose`] (or dropping the handle) runs the removal
/// exactly once. Use [`Disposer::keep`] to leave the registration in place for
/// the lifetime of its owner.
#[must_use = "dropping a Disposer immediately unregisters the callback"]
pub struct Disposer {
    remove: Option<Box<dyn FnOnce()>>,
}

impl Disposer {
    pub fn new<F: FnOnce() + 'static>(remove: F) -> Self {
        Self {
            remove: Some(Box::new(remove)),
        }
    }

    /// A handle with nothing to undo.
    pub fn noop() -> Self {
        Self { remove: None }
    }

    /// Unregister now.
    pub fn dispose(mut self) {
        self.run();
    }

    /// Give up the handle without unregistering.
    pub fn keep(mut self) {
        self.remove = None;
    }

    pub fn is_active(&self) -> bool {
        self.remove.is_some()
    }

    fn run(&mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl Drop for Disposer {
    fn drop(&mut self) {
        self.run();
    }
}

impl std::fmt::Debug for Disposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Disposer")
            .field("active", &self.is_active())
            .finish()
    }
}
