//! Application message types for listboard.
//!
//! Section callbacks produce these messages; the board handles them in its
//! update step, Elm architecture style.

use listboard_ui::SectionId;

use crate::card::Card;

/// Messages that can be sent to update board state.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// A section expanded or collapsed (including the deferred restore notice)
    ExpansionChanged {
        section: SectionId,
        expanded: bool,
    },
    /// A card was released on a section's drop target
    ItemDropped { section: SectionId, card: Card },
}

impl Message {
    /// The section this message is about.
    pub fn section(&self) -> &SectionId {
        match self {
            Message::ExpansionChanged { section, .. } | Message::ItemDropped { section, .. } => {
                section
            }
        }
    }
}
