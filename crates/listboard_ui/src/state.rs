//! Section identity and expansion state

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::callback::Listener;
use crate::store::PersistedStateStore;

/// Stable, caller-supplied key addressing a section's persisted state.
///
/// Must stay constant for the section's lifetime. Recreating a section under a
/// different id makes it a brand-new section with default initial state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The canonical expanded/collapsed flag of one section.
///
/// Host commands, header taps and the drag-hover timer all mutate the flag
/// through [`set_expanded`](Self::set_expanded). A real change is announced to
/// the registered listener and written to the store before the call returns.
pub struct ExpansionState {
    id: SectionId,
    expanded: bool,
    store: Rc<dyn PersistedStateStore>,
    on_change: Listener<bool>,
}

impl ExpansionState {
    /// Seed the state from the store, falling back to `default` when the id was never written.
    pub fn restore(id: SectionId, default: bool, store: Rc<dyn PersistedStateStore>) -> Self {
        let expanded = match store.read(&id) {
            Some(stored) => {
                log::debug!(
                    "ExpansionState '{}': restored expanded={} (default {})",
                    id,
                    stored,
                    default
                );
                stored
            }
            None => default,
        };

        Self {
            id,
            expanded,
            store,
            on_change: Listener::none(),
        }
    }

    pub fn id(&self) -> &SectionId {
        &self.id
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Register the change listener, replacing any previous one
    pub fn on_change(&mut self, listener: Listener<bool>) {
        self.on_change = listener;
    }

    /// Apply `value`. Returns `true` if the flag actually changed.
    pub fn set_expanded(&mut self, value: bool) -> bool {
        if value == self.expanded {
            return false;
        }

        self.expanded = value;
        log::debug!("ExpansionState '{}': expanded={}", self.id, value);
        self.on_change.emit(value);
        self.store.write(&self.id, value);
        true
    }
}

impl fmt::Debug for ExpansionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpansionState")
            .field("id", &self.id)
            .field("expanded", &self.expanded)
            .field("on_change", &self.on_change)
            .finish_non_exhaustive()
    }
}
