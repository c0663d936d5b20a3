//! Render description of a section
//!
//! [`CollapsibleSection::view`](super::CollapsibleSection::view) produces a
//! [`SectionView`]: a borrowed, fully derived picture of what to draw this frame.
//! Nothing in here is stored state; two calls without an intervening mutation
//! yield equal views.

use crate::layout::HorizontalAlign;
use crate::state::SectionId;
use crate::theme::{Borders, Color};

/// Everything needed to draw one section this frame
#[derive(Debug)]
pub struct SectionView<'a, I> {
    pub id: &'a SectionId,
    pub header: HeaderView<'a>,
    pub body: BodyView<'a, I>,
    /// Footer for the current state (collapsed footer falls back to the regular one)
    pub footer: Option<&'a str>,
    /// Eased height factor applied to the body, in `[0, 1]`
    pub height_factor: f32,
    /// Item area background
    pub content_bg: Color,
    pub border_color: Color,
    pub corner_radius: f32,
    pub borders: Borders,
}

impl<'a, I> SectionView<'a, I> {
    pub fn is_expanded(&self) -> bool {
        matches!(self.body, BodyView::Expanded(_))
    }

    /// The item region that is drawn, if any
    pub fn items(&self) -> Option<&ItemsView<'a, I>> {
        match &self.body {
            BodyView::Expanded(items) => Some(items),
            BodyView::Collapsed(overlay) => overlay.frozen.as_ref(),
        }
    }
}

/// Header row
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderView<'a> {
    pub title: &'a str,
    pub leading: LeadingView<'a>,
    pub align: HorizontalAlign,
    /// Pointer is over the header
    pub hovered: bool,
    /// Background for the current hover state
    pub background: Color,
    pub text_color: Color,
}

/// Leading control of the header
#[derive(Debug, Clone, PartialEq)]
pub enum LeadingView<'a> {
    /// Disclosure chevron rotated by `turns` (0 collapsed, 0.5 expanded)
    Chevron { turns: f32 },
    /// Caller-provided control
    Custom(&'a str),
    Hidden,
}

/// Region below the header
#[derive(Debug)]
pub enum BodyView<'a, I> {
    /// Scrollable items ending in the drop target
    Expanded(ItemsView<'a, I>),
    /// Overlay shown while collapsed
    Collapsed(CollapsedOverlay<'a, I>),
}

/// What replaces the item sequence while collapsed
#[derive(Debug)]
pub struct CollapsedOverlay<'a, I> {
    /// Last expanded visual, kept until the collapse animation finishes
    pub frozen: Option<ItemsView<'a, I>>,
    /// Invisible layer spanning the section that reacts to drag hover and drops
    pub hover_layer: HoverLayerView,
}

/// Drag-sensitive layer over a collapsed section
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverLayerView {
    /// The hover auto-expand window is running
    pub armed: bool,
    /// Highlight to draw while armed; the layer is invisible otherwise
    pub highlight: Option<Color>,
}

/// The item sequence
#[derive(Debug)]
pub struct ItemsView<'a, I> {
    pub items: &'a [I],
    /// Shown instead of items when the sequence is empty
    pub empty_placeholder: Option<&'a str>,
    pub drop_target: DropTargetView<'a>,
    pub align: HorizontalAlign,
    /// Items exceed the maximum content height
    pub scrollable: bool,
}

impl<I> ItemsView<'_, I> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Terminal drop target after the last item
#[derive(Debug, Clone, PartialEq)]
pub struct DropTargetView<'a> {
    pub height: f32,
    pub placeholder: Option<&'a str>,
    /// Drawn only while expanded; it still accepts drops when hidden
    pub visible: bool,
}
