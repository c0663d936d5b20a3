//! listboard - Boards of collapsible card sections
//!
//! Host layer around [`listboard_ui`]: application configuration, a JSON file
//! store for expansion state, and a [`Board`] that stacks sections and moves
//! cards between them by drag and drop.

mod board;
mod card;
mod config;
mod message;
mod store;

pub use board::{Board, BoardError, DEFAULT_BOARD_WIDTH, SECTION_SPACING};
pub use card::Card;
pub use config::{AppConfig, ConfigFileError, LogLevel, SectionSpec, CONFIG_VERSION};
pub use message::Message;
pub use store::{JsonFileStore, StoreError};
