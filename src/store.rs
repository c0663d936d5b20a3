//! JSON file backed expansion state store.
//!
//! The file holds a single object mapping section ids to their expansion flag:
//!
//! ```json
//! { "doing": true, "done": false }
//! ```
//!
//! The whole file is rewritten on every write. A missing file is an empty store.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use listboard_ui::{PersistedStateStore, SectionId};
use thiserror::Error;

/// Errors that can occur while loading or saving the state file.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error on the state file
    #[error("I/O error on {path:?}: {source}")]
    Io {
        /// The state file
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// State file is not a JSON object of booleans
    #[error("Malformed state file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Expansion state persisted to a JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: RefCell<BTreeMap<SectionId, bool>>,
}

impl JsonFileStore {
    /// Open the store at `path`, loading any existing state.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = if path.exists() {
            let json = std::fs::read_to_string(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&json)?
        } else {
            log::debug!("No state file at {:?}, starting empty", path);
            BTreeMap::new()
        };

        log::info!("Opened state file {:?} ({} entries)", path, values.len());
        Ok(Self {
            path,
            values: RefCell::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }

    /// Write the current state to disk.
    pub fn flush(&self) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(&*self.values.borrow())?;
        std::fs::write(&self.path, json).map_err(io_err)?;
        log::trace!("Flushed state file {:?}", self.path);
        Ok(())
    }
}

impl PersistedStateStore for JsonFileStore {
    fn read(&self, id: &SectionId) -> Option<bool> {
        self.values.borrow().get(id).copied()
    }

    fn write(&self, id: &SectionId, expanded: bool) {
        self.values.borrow_mut().insert(id.clone(), expanded);
        // The in-memory value stays authoritative for this session
        if let Err(e) = self.flush() {
            log::warn!("Failed to persist state for '{}': {}", id, e);
        }
    }
}
