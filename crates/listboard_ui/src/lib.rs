//! listboard_ui - Headless collapsible list sections for board-style UIs
//!
//! A [`CollapsibleSection`] is a titled list of items that expands and
//! collapses with a short animation, persists its expansion flag under a stable
//! [`SectionId`], auto-expands when a drag payload hovers over it while
//! collapsed, and ends with a drop target that keeps accepting drops while
//! collapsed.
//!
//! The crate draws nothing. The host feeds it [`Event`]s and frame times, and
//! renders the [`SectionView`] it describes.

mod animation;
mod callback;
mod constants;
mod error;
mod event;
mod hover_timer;
mod layout;
mod state;
mod store;
mod theme;
mod widgets;

pub use animation::{ease_in_cubic, AnimationStatus, ExpansionAnimator, Settled};
pub use callback::{Callback, Listener};
pub use constants::*;
pub use error::ConfigError;
pub use event::{Event, KeyCode, MouseButton};
pub use hover_timer::{DragHoverTimer, HoverTimerState};
pub use layout::{Alignment, Bounds, HorizontalAlign, Point, Size};
pub use state::{ExpansionState, SectionId};
pub use store::{MemoryStore, PersistedStateStore};
pub use theme::{Borders, Color, Decoration};

// Re-export widgets
pub use widgets::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::callback::{Callback, Listener};
    pub use crate::error::ConfigError;
    pub use crate::event::{Event, KeyCode, MouseButton};
    pub use crate::layout::{Alignment, Bounds, HorizontalAlign, Size};
    pub use crate::state::SectionId;
    pub use crate::store::{MemoryStore, PersistedStateStore};
    pub use crate::theme::Decoration;
    pub use crate::widgets::{section, CollapsibleSection, DroppedItem, SectionConfig};
}
