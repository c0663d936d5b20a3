//! Board hosting several collapsible sections stacked vertically.
//!
//! The board owns the sections, routes frame ticks and input to them, and
//! handles the [`Message`]s their callbacks produce. Cards move between
//! sections by drag and drop: [`Board::pick_up`] removes a card from its
//! section, and a drop accepted by another section's drop target appends it
//! there. A drop nobody accepts returns the card to where it came from.

use std::fmt::Write as _;
use std::rc::Rc;

use listboard_ui::{
    BodyView, Bounds, CollapsibleSection, ConfigError, DroppedItem, Event, LeadingView,
    PersistedStateStore, Point, SectionConfig, SectionId, SectionLayout,
};
use thiserror::Error;
use web_time::Instant;

use crate::card::Card;
use crate::config::{AppConfig, SectionSpec};
use crate::message::Message;

/// Vertical gap between sections
pub const SECTION_SPACING: f32 = 8.0;

/// Default board width
pub const DEFAULT_BOARD_WIDTH: f32 = 320.0;

/// Errors from board operations.
#[derive(Error, Debug)]
pub enum BoardError {
    /// Section configuration was rejected
    #[error("Invalid section '{id}': {source}")]
    InvalidSection {
        id: String,
        #[source]
        source: ConfigError,
    },

    /// A section with this id is already mounted
    #[error("Section already mounted: {0}")]
    DuplicateSection(SectionId),

    /// No mounted section has this id
    #[error("Unknown section: {0}")]
    UnknownSection(SectionId),

    /// The section has no card with this id
    #[error("Card {card} not found in section '{section}'")]
    UnknownCard { section: SectionId, card: u32 },

    /// Only one card can be dragged at a time
    #[error("A drag is already in progress")]
    DragInProgress,

    /// Drop requested with nothing picked up
    #[error("No drag in progress")]
    NoDrag,
}

/// Card currently being dragged and where it came from
#[derive(Debug)]
struct Drag {
    source: SectionId,
    index: usize,
    card: Card,
}

/// A vertical stack of collapsible card sections.
pub struct Board {
    name: String,
    width: f32,
    store: Rc<dyn PersistedStateStore>,
    sections: Vec<CollapsibleSection<Card, Message>>,
    drag: Option<Drag>,
    expansion_log: Vec<(SectionId, bool)>,
}

impl Board {
    /// Create an empty board persisting expansion state to `store`.
    pub fn new(name: impl Into<String>, store: Rc<dyn PersistedStateStore>) -> Self {
        Self {
            name: name.into(),
            width: DEFAULT_BOARD_WIDTH,
            store,
            sections: Vec::new(),
            drag: None,
            expansion_log: Vec::new(),
        }
    }

    /// Create a board with every section from `config` mounted.
    pub fn from_config(
        config: &AppConfig,
        store: Rc<dyn PersistedStateStore>,
    ) -> Result<Self, BoardError> {
        let mut board = Self::new(config.board_name.clone(), store);
        for spec in &config.sections {
            board.mount(spec)?;
        }
        Ok(board)
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sections(&self) -> &[CollapsibleSection<Card, Message>] {
        &self.sections
    }

    pub fn section(&self, id: &SectionId) -> Option<&CollapsibleSection<Card, Message>> {
        self.sections.iter().find(|s| s.id() == id)
    }

    fn section_mut(
        &mut self,
        id: &SectionId,
    ) -> Result<&mut CollapsibleSection<Card, Message>, BoardError> {
        self.sections
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or_else(|| BoardError::UnknownSection(id.clone()))
    }

    /// Every expansion change the board has handled, in order
    pub fn expansion_log(&self) -> &[(SectionId, bool)] {
        &self.expansion_log
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Mount a section at the bottom of the board.
    pub fn mount(&mut self, spec: &SectionSpec) -> Result<(), BoardError> {
        let id = SectionId::new(spec.id.clone());
        if self.section(&id).is_some() {
            return Err(BoardError::DuplicateSection(id));
        }

        let changed_id = id.clone();
        let mut config = SectionConfig::new()
            .id(id)
            .header(spec.title.clone())
            .initially_expanded(spec.initially_expanded)
            .items(spec.items.clone())
            .empty_placeholder("No cards")
            .drop_placeholder("Drop a card here")
            .on_expansion_changed(move |expanded| Message::ExpansionChanged {
                section: changed_id.clone(),
                expanded,
            })
            .on_item_dropped(|dropped: DroppedItem<Card>| Message::ItemDropped {
                section: dropped.section,
                card: dropped.item,
            });
        if let Some(footer) = &spec.footer {
            config = config.footer(footer.clone());
        }
        if let Some(footer) = &spec.collapsed_footer {
            config = config.collapsed_footer(footer.clone());
        }

        let section = config
            .build(Rc::clone(&self.store))
            .map_err(|source| BoardError::InvalidSection {
                id: spec.id.clone(),
                source,
            })?;
        log::info!(
            "Mounted section '{}' (expanded={})",
            section.id(),
            section.is_expanded()
        );
        self.sections.push(section);
        Ok(())
    }

    /// Remove a section from the board, releasing its timer and animation.
    pub fn unmount(&mut self, id: &SectionId) -> Result<(), BoardError> {
        let index = self
            .sections
            .iter()
            .position(|s| s.id() == id)
            .ok_or_else(|| BoardError::UnknownSection(id.clone()))?;
        let mut section = self.sections.remove(index);
        section.dispose();
        log::info!("Unmounted section '{}'", id);
        Ok(())
    }

    /// Section regions for the current frame, top to bottom
    pub fn layout(&self) -> Vec<SectionLayout> {
        let mut y = 0.0;
        self.sections
            .iter()
            .map(|section| {
                let layout = section.layout(Bounds::new(0.0, y, self.width, 0.0));
                y = layout.bounds.bottom() + SECTION_SPACING;
                layout
            })
            .collect()
    }

    pub fn section_layout(&self, id: &SectionId) -> Option<SectionLayout> {
        self.sections
            .iter()
            .zip(self.layout())
            .find(|(s, _)| s.id() == id)
            .map(|(_, layout)| layout)
    }

    /// Total board height for the current frame
    pub fn height(&self) -> f32 {
        self.layout().last().map_or(0.0, |l| l.bounds.bottom())
    }

    /// Advance every section to `now`, then run the post-render pass.
    pub fn frame(&mut self, now: Instant) -> Vec<Message> {
        let mut messages: Vec<Message> = self
            .sections
            .iter_mut()
            .filter_map(|s| s.tick(now))
            .collect();
        messages.extend(self.sections.iter_mut().filter_map(|s| s.post_render()));

        for message in &messages {
            self.update(message);
        }
        messages
    }

    /// Route an event to every section at its current bounds.
    pub fn dispatch(&mut self, event: &Event<Card>, now: Instant) -> Vec<Message> {
        let layout = self.layout();
        let messages: Vec<Message> = self
            .sections
            .iter_mut()
            .zip(&layout)
            .filter_map(|(section, l)| section.on_event(event, l.bounds, now))
            .collect();

        if let Event::Drop { .. } = event {
            if let Some(drag) = self.drag.take() {
                let accepted = messages
                    .iter()
                    .any(|m| matches!(m, Message::ItemDropped { .. }));
                if !accepted {
                    self.restore(drag);
                }
            }
        }

        for message in &messages {
            self.update(message);
        }
        messages
    }

    /// Handle a message produced by a section.
    pub fn update(&mut self, message: &Message) {
        match message {
            Message::ExpansionChanged { section, expanded } => {
                log::info!(
                    "Section '{}' {}",
                    section,
                    if *expanded { "expanded" } else { "collapsed" }
                );
                self.expansion_log.push((section.clone(), *expanded));
            }
            Message::ItemDropped { section, card } => match self.section_mut(section) {
                Ok(target) => {
                    target.items_mut().push(card.clone());
                    log::info!("Card {} dropped on '{}'", card.id, section);
                }
                Err(e) => log::warn!("Dropped card {} lost: {}", card.id, e),
            },
        }
    }

    fn command(
        &mut self,
        id: &SectionId,
        op: impl FnOnce(&mut CollapsibleSection<Card, Message>) -> Option<Message>,
    ) -> Result<Option<Message>, BoardError> {
        let message = op(self.section_mut(id)?);
        if let Some(message) = &message {
            self.update(message);
        }
        Ok(message)
    }

    pub fn expand(&mut self, id: &SectionId) -> Result<Option<Message>, BoardError> {
        self.command(id, CollapsibleSection::expand)
    }

    pub fn collapse(&mut self, id: &SectionId) -> Result<Option<Message>, BoardError> {
        self.command(id, CollapsibleSection::collapse)
    }

    pub fn toggle(&mut self, id: &SectionId) -> Result<Option<Message>, BoardError> {
        self.command(id, CollapsibleSection::toggle)
    }

    /// Start dragging a card, removing it from its section.
    pub fn pick_up(&mut self, section: &SectionId, card: u32) -> Result<Card, BoardError> {
        if self.drag.is_some() {
            return Err(BoardError::DragInProgress);
        }

        let source = self.section_mut(section)?;
        let index = source
            .items()
            .iter()
            .position(|c| c.id == card)
            .ok_or_else(|| BoardError::UnknownCard {
                section: section.clone(),
                card,
            })?;
        let card = source.items_mut().remove(index);
        log::debug!("Picked up card {} from '{}'", card.id, section);

        self.drag = Some(Drag {
            source: section.clone(),
            index,
            card: card.clone(),
        });
        Ok(card)
    }

    /// Move the dragged card to `position`.
    pub fn drag_to(&mut self, position: Point, now: Instant) -> Vec<Message> {
        self.dispatch(&Event::DragMove { position }, now)
    }

    /// Release the dragged card at `position`.
    pub fn drop_at(&mut self, position: Point, now: Instant) -> Result<Vec<Message>, BoardError> {
        let item = self
            .drag
            .as_ref()
            .map(|drag| drag.card.clone())
            .ok_or(BoardError::NoDrag)?;
        Ok(self.dispatch(&Event::Drop { item, position }, now))
    }

    /// Abandon the drag, returning the card to its section.
    pub fn cancel_drag(&mut self, now: Instant) {
        self.dispatch(&Event::DragLeave, now);
        if let Some(drag) = self.drag.take() {
            self.restore(drag);
        }
    }

    fn restore(&mut self, drag: Drag) {
        match self.section_mut(&drag.source) {
            Ok(source) => {
                let index = drag.index.min(source.items().len());
                source.items_mut().insert(index, drag.card);
                log::debug!("Returned card to '{}'", drag.source);
            }
            Err(e) => log::warn!("Dragged card {} lost: {}", drag.card.id, e),
        }
    }

    /// Plain-text rendering of every section's current view.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "== {} ==", self.name);

        for section in &self.sections {
            let view = section.view();
            let marker = match &view.header.leading {
                LeadingView::Chevron { turns } if *turns >= 0.25 => "v ",
                LeadingView::Chevron { .. } => "> ",
                LeadingView::Custom(control) => *control,
                LeadingView::Hidden => "",
            };
            let _ = writeln!(
                out,
                "{}{} ({})",
                marker,
                view.header.title,
                section.items().len()
            );

            match &view.body {
                BodyView::Expanded(items) => {
                    for card in items.items {
                        let _ = writeln!(out, "    [{}] {}", card.id, card.title);
                    }
                    if let Some(placeholder) = items.empty_placeholder {
                        let _ = writeln!(out, "    ({})", placeholder);
                    }
                    if let Some(placeholder) = items.drop_target.placeholder {
                        let _ = writeln!(out, "    [ {} ]", placeholder);
                    }
                }
                BodyView::Collapsed(overlay) => {
                    if overlay.hover_layer.highlight.is_some() {
                        let _ = writeln!(out, "    (opening...)");
                    }
                }
            }

            if let Some(footer) = view.footer {
                let _ = writeln!(out, "  {}", footer);
            }
        }
        out
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Board")
            .field("name", &self.name)
            .field("sections", &self.sections)
            .field("drag", &self.drag)
            .finish_non_exhaustive()
    }
}
