//! Persisted expansion state
//!
//! Sections do not own the storage of their expansion flag. They address an
//! external keyed store by [`SectionId`] and write to it on every real change.
//! The store outlives any single section; a section recreated with the same id
//! restores the last written value.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::state::SectionId;

/// Keyed read/write of a boolean by stable section identity.
///
/// Methods take `&self` because one store is shared (via `Rc`) by every
/// section on a board; implementations use interior mutability.
pub trait PersistedStateStore {
    /// Read the stored flag for `id`, if one was ever written.
    fn read(&self, id: &SectionId) -> Option<bool>;

    /// Store `expanded` for `id`. Repeated writes to the same key must be tolerated.
    fn write(&self, id: &SectionId, expanded: bool);
}

/// In-process store backed by a hash map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<SectionId, bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys written so far
    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }

    /// Forget every stored value
    pub fn clear(&self) {
        self.values.borrow_mut().clear();
    }
}

impl PersistedStateStore for MemoryStore {
    fn read(&self, id: &SectionId) -> Option<bool> {
        self.values.borrow().get(id).copied()
    }

    fn write(&self, id: &SectionId, expanded: bool) {
        log::trace!("MemoryStore: {} = {}", id, expanded);
        self.values.borrow_mut().insert(id.clone(), expanded);
    }
}
