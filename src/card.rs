//! Card data model for board items.

use serde::{Deserialize, Serialize};

/// A card shown as one item in a board section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier for the card
    pub id: u32,
    /// Display title of the card
    pub title: String,
}

impl Card {
    /// Create a new card with the given ID and title.
    pub fn new(id: u32, title: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
        }
    }
}
