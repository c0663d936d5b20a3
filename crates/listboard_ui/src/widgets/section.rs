//! Collapsible, reorderable list section widget
//!
//! Features:
//! - Click the header (or press Enter/Space while hovering it) to toggle
//! - Host commands through [`CollapsibleSection::expand`] / [`collapse`](CollapsibleSection::collapse)
//! - Auto-expand when a drag payload lingers over a collapsed section
//! - Terminal drop target that keeps accepting drops while collapsed
//! - Expansion flag persisted under a stable [`SectionId`]

use std::rc::Rc;

use web_time::Instant;

use crate::animation::{ExpansionAnimator, Settled};
use crate::callback::{Callback, Listener};
use crate::constants::{
    CHEVRON_EXPANDED_TURNS, DEFAULT_DROP_TARGET_HEIGHT, DEFAULT_EMPTY_PLACEHOLDER,
    DEFAULT_ITEM_EXTENT, SECTION_FOOTER_HEIGHT, SECTION_HEADER_HEIGHT,
};
use crate::error::ConfigError;
use crate::event::{Event, KeyCode, MouseButton};
use crate::hover_timer::DragHoverTimer;
use crate::layout::{Alignment, Bounds, Size};
use crate::state::{ExpansionState, SectionId};
use crate::store::PersistedStateStore;
use crate::theme::{Borders, Decoration};
use crate::widgets::view::{
    BodyView, CollapsedOverlay, DropTargetView, HeaderView, HoverLayerView, ItemsView,
    LeadingView, SectionView,
};

/// Payload of the "item dropped" callback
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedItem<I> {
    /// The item released on the terminal drop target
    pub item: I,
    /// The section that accepted it
    pub section: SectionId,
}

/// Leading control shown in the header
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LeadingControl {
    /// Rotating disclosure chevron
    #[default]
    Chevron,
    /// Caller-provided control, drawn as-is
    Custom(String),
    /// No leading control
    Hidden,
}

/// Who asked for an expansion change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChangeSource {
    Host,
    User,
    DragHover,
}

/// One-shot announcement of restored state that differs from the stated default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MountNotice {
    Pending(bool),
    Done,
}

/// Static configuration of a section's regions
#[derive(Debug)]
struct SectionContent<I> {
    header: String,
    footer: Option<String>,
    collapsed_footer: Option<String>,
    leading: LeadingControl,
    decoration: Decoration,
    items: Vec<I>,
    empty_placeholder: String,
    drop_placeholder: Option<String>,
    alignment: Alignment,
    drop_target_height: f32,
    item_extent: f32,
    max_content_height: Option<f32>,
    borders: Borders,
}

// =============================================================================
// Configuration
// =============================================================================

/// Construction-time configuration for a [`CollapsibleSection`].
///
/// `id` and `header` are required; everything else has a default.
///
/// ```ignore
/// let section = SectionConfig::new()
///     .id("backlog")
///     .header("Backlog")
///     .initially_expanded(true)
///     .items(cards)
///     .on_expansion_changed(Message::Toggled)
///     .build(store)?;
/// ```
pub struct SectionConfig<I, M> {
    id: Option<SectionId>,
    header: Option<String>,
    initially_expanded: bool,
    footer: Option<String>,
    collapsed_footer: Option<String>,
    leading: LeadingControl,
    decoration: Decoration,
    items: Vec<I>,
    empty_placeholder: String,
    drop_placeholder: Option<String>,
    alignment: Alignment,
    drop_target_height: f32,
    item_extent: f32,
    max_content_height: Option<f32>,
    suppress_borders: bool,
    on_expansion_changed: Callback<bool, M>,
    on_item_dropped: Callback<DroppedItem<I>, M>,
    on_state_change: Listener<bool>,
}

impl<I, M> Default for SectionConfig<I, M> {
    fn default() -> Self {
        Self {
            id: None,
            header: None,
            initially_expanded: false,
            footer: None,
            collapsed_footer: None,
            leading: LeadingControl::default(),
            decoration: Decoration::default(),
            items: Vec::new(),
            empty_placeholder: DEFAULT_EMPTY_PLACEHOLDER.to_string(),
            drop_placeholder: None,
            alignment: Alignment::default(),
            drop_target_height: DEFAULT_DROP_TARGET_HEIGHT,
            item_extent: DEFAULT_ITEM_EXTENT,
            max_content_height: None,
            suppress_borders: false,
            on_expansion_changed: Callback::none(),
            on_item_dropped: Callback::none(),
            on_state_change: Listener::none(),
        }
    }
}

impl<I, M> SectionConfig<I, M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stable identity used to address persisted state
    pub fn id(mut self, id: impl Into<SectionId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Header title
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Expansion used when the store has nothing for this id
    pub fn initially_expanded(mut self, expanded: bool) -> Self {
        self.initially_expanded = expanded;
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Footer shown while collapsed (falls back to the regular footer)
    pub fn collapsed_footer(mut self, footer: impl Into<String>) -> Self {
        self.collapsed_footer = Some(footer.into());
        self
    }

    pub fn leading(mut self, leading: LeadingControl) -> Self {
        self.leading = leading;
        self
    }

    pub fn decoration(mut self, decoration: Decoration) -> Self {
        self.decoration = decoration;
        self
    }

    pub fn items(mut self, items: Vec<I>) -> Self {
        self.items = items;
        self
    }

    /// Text shown in place of items when the section is empty
    pub fn empty_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.empty_placeholder = placeholder.into();
        self
    }

    /// Content drawn inside the terminal drop target
    pub fn drop_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.drop_placeholder = Some(placeholder.into());
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn drop_target_height(mut self, height: f32) -> Self {
        self.drop_target_height = height;
        self
    }

    /// Height of one item row
    pub fn item_extent(mut self, extent: f32) -> Self {
        self.item_extent = extent;
        self
    }

    /// Maximum item region height before it scrolls
    pub fn max_content_height(mut self, height: f32) -> Self {
        self.max_content_height = Some(height);
        self
    }

    /// Skip the default top and bottom borders
    pub fn suppress_borders(mut self, suppress: bool) -> Self {
        self.suppress_borders = suppress;
        self
    }

    /// Host message for every real expansion change
    pub fn on_expansion_changed<F>(mut self, callback: F) -> Self
    where
        F: Fn(bool) -> M + 'static,
    {
        self.on_expansion_changed = Callback::new(callback);
        self
    }

    /// Host message for every accepted drop on the terminal drop target
    pub fn on_item_dropped<F>(mut self, callback: F) -> Self
    where
        F: Fn(DroppedItem<I>) -> M + 'static,
    {
        self.on_item_dropped = Callback::new(callback);
        self
    }

    /// Synchronous side-effect hook on the underlying expansion state
    pub fn on_state_change<F>(mut self, listener: F) -> Self
    where
        F: Fn(bool) + 'static,
    {
        self.on_state_change = Listener::new(listener);
        self
    }

    /// Validate the configuration and mount the section, restoring its flag from `store`.
    pub fn build(
        self,
        store: Rc<dyn PersistedStateStore>,
    ) -> Result<CollapsibleSection<I, M>, ConfigError> {
        let id = self.id.ok_or(ConfigError::MissingField { field: "id" })?;
        if id.is_empty() {
            return Err(ConfigError::EmptyId);
        }
        let header = self.header.ok_or(ConfigError::MissingField { field: "header" })?;
        check_extent("drop_target_height", self.drop_target_height)?;
        check_extent("item_extent", self.item_extent)?;
        if let Some(max) = self.max_content_height {
            check_extent("max_content_height", max)?;
        }

        let mut state = ExpansionState::restore(id, self.initially_expanded, store);
        state.on_change(self.on_state_change);
        let expanded = state.is_expanded();

        let mount_notice = if expanded != self.initially_expanded {
            MountNotice::Pending(expanded)
        } else {
            MountNotice::Done
        };

        log::debug!(
            "CollapsibleSection '{}': mounted expanded={} ({} items)",
            state.id(),
            expanded,
            self.items.len()
        );

        Ok(CollapsibleSection {
            state,
            animator: ExpansionAnimator::new(expanded),
            hover_timer: DragHoverTimer::new(),
            content: SectionContent {
                header,
                footer: self.footer,
                collapsed_footer: self.collapsed_footer,
                leading: self.leading,
                decoration: self.decoration,
                items: self.items,
                empty_placeholder: self.empty_placeholder,
                drop_placeholder: self.drop_placeholder,
                alignment: self.alignment,
                drop_target_height: self.drop_target_height,
                item_extent: self.item_extent,
                max_content_height: self.max_content_height,
                borders: if self.suppress_borders {
                    Borders::NONE
                } else {
                    Borders::BOTH
                },
            },
            on_expansion_changed: self.on_expansion_changed,
            on_item_dropped: self.on_item_dropped,
            mount_notice,
            hover_header: false,
            drag_inside: false,
            disposed: false,
        })
    }
}

/// Start configuring a section
pub fn section<I, M>() -> SectionConfig<I, M> {
    SectionConfig::new()
}

fn check_extent(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidExtent { field, value })
    }
}

// =============================================================================
// Layout
// =============================================================================

/// Region bounds of a section for the current frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionLayout {
    /// Whole section
    pub bounds: Bounds,
    pub header: Bounds,
    /// Visible (animated) item region
    pub body: Bounds,
    /// Terminal drop target at the end of the visible item region
    pub drop_target: Bounds,
    pub footer: Option<Bounds>,
}

// =============================================================================
// Section
// =============================================================================

/// A collapsible, reorderable list section.
///
/// The expansion flag is owned by an [`ExpansionState`]; the height animation by
/// an [`ExpansionAnimator`]; hover auto-expand by a [`DragHoverTimer`]. Every
/// operation that can notify the host returns the host message instead of
/// calling out, so notifications are ordered by the host's own update loop.
pub struct CollapsibleSection<I, M> {
    state: ExpansionState,
    animator: ExpansionAnimator,
    hover_timer: DragHoverTimer,
    content: SectionContent<I>,
    on_expansion_changed: Callback<bool, M>,
    on_item_dropped: Callback<DroppedItem<I>, M>,
    mount_notice: MountNotice,
    /// Internal: pointer is over the header
    hover_header: bool,
    /// Internal: a drag payload is inside the section bounds
    drag_inside: bool,
    disposed: bool,
}

impl<I, M> CollapsibleSection<I, M> {
    pub fn id(&self) -> &SectionId {
        self.state.id()
    }

    pub fn is_expanded(&self) -> bool {
        self.state.is_expanded()
    }

    /// Progress is at rest on the bound matching the current state
    pub fn is_settled(&self) -> bool {
        self.animator.is_settled()
    }

    pub fn animator(&self) -> &ExpansionAnimator {
        &self.animator
    }

    pub fn hover_armed(&self) -> bool {
        self.hover_timer.is_armed()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn header(&self) -> &str {
        &self.content.header
    }

    pub fn items(&self) -> &[I] {
        &self.content.items
    }

    pub fn items_mut(&mut self) -> &mut Vec<I> {
        &mut self.content.items
    }

    pub fn set_items(&mut self, items: Vec<I>) {
        self.content.items = items;
    }

    /// Expand. No-op (and no message) if already expanded.
    pub fn expand(&mut self) -> Option<M> {
        self.apply(true, ChangeSource::Host)
    }

    /// Collapse. No-op (and no message) if already collapsed.
    pub fn collapse(&mut self) -> Option<M> {
        self.apply(false, ChangeSource::Host)
    }

    pub fn toggle(&mut self) -> Option<M> {
        let target = !self.is_expanded();
        self.apply(target, ChangeSource::Host)
    }

    /// Single funnel for every actor that changes the flag
    fn apply(&mut self, expanded: bool, source: ChangeSource) -> Option<M> {
        if self.disposed {
            log::warn!(
                "CollapsibleSection '{}': {:?} change ignored after dispose",
                self.id(),
                source
            );
            return None;
        }

        if !self.state.set_expanded(expanded) {
            return None;
        }

        self.animator.set_target(expanded);
        if expanded {
            self.hover_timer.cancel();
        }
        // The host now hears about the current state directly
        self.mount_notice = MountNotice::Done;

        log::debug!(
            "CollapsibleSection '{}': {} by {:?}",
            self.id(),
            if expanded { "expanded" } else { "collapsed" },
            source
        );
        self.on_expansion_changed.call(expanded)
    }

    /// Advance timers and animation to `now`.
    ///
    /// Returns the expansion message if the hover timer fired this frame.
    pub fn tick(&mut self, now: Instant) -> Option<M> {
        if self.disposed {
            return None;
        }

        let mut message = None;
        if self.hover_timer.poll(now) && !self.is_expanded() {
            message = self.apply(true, ChangeSource::DragHover);
        }

        match self.animator.tick(now) {
            Some(Settled::Collapsed) => {
                log::debug!("CollapsibleSection '{}': content detached", self.id());
            }
            Some(Settled::Expanded) => {
                log::trace!("CollapsibleSection '{}': fully expanded", self.id());
            }
            None => {}
        }

        message
    }

    /// Call after each completed render pass.
    ///
    /// The first call announces restored state that differs from the stated
    /// default; every later call returns `None`.
    pub fn post_render(&mut self) -> Option<M> {
        if self.disposed {
            return None;
        }
        match std::mem::replace(&mut self.mount_notice, MountNotice::Done) {
            MountNotice::Pending(expanded) => {
                log::debug!(
                    "CollapsibleSection '{}': announcing restored expanded={}",
                    self.id(),
                    expanded
                );
                self.on_expansion_changed.call(expanded)
            }
            MountNotice::Done => None,
        }
    }

    /// Release the timer and animation. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.hover_timer.cancel();
        self.animator.dispose();
        self.mount_notice = MountNotice::Done;
        self.drag_inside = false;
        self.disposed = true;
        log::debug!("CollapsibleSection '{}': disposed", self.id());
    }

    /// Full height of the item region, before animation scaling
    fn content_height(&self) -> f32 {
        let rows = self.content.items.len().max(1) as f32;
        let full = rows * self.content.item_extent + self.content.drop_target_height;
        match self.content.max_content_height {
            Some(max) => full.min(max),
            None => full,
        }
    }

    fn is_scrollable(&self) -> bool {
        let rows = self.content.items.len().max(1) as f32;
        let full = rows * self.content.item_extent + self.content.drop_target_height;
        self.content.max_content_height.is_some_and(|max| full > max)
    }

    fn current_footer(&self) -> Option<&str> {
        if self.is_expanded() {
            self.content.footer.as_deref()
        } else {
            self.content
                .collapsed_footer
                .as_deref()
                .or(self.content.footer.as_deref())
        }
    }

    /// Lay the regions out from the origin of `bounds`; its height is ignored.
    pub fn layout(&self, bounds: Bounds) -> SectionLayout {
        let factor = self.animator.height_factor();
        let header = Bounds::new(bounds.x, bounds.y, bounds.width, SECTION_HEADER_HEIGHT);
        let body = Bounds::new(
            bounds.x,
            header.bottom(),
            bounds.width,
            self.content_height() * factor,
        );
        let drop_height = (self.content.drop_target_height * factor).min(body.height);
        let drop_target = Bounds::new(
            bounds.x,
            body.bottom() - drop_height,
            bounds.width,
            drop_height,
        );
        let footer = self
            .current_footer()
            .map(|_| Bounds::new(bounds.x, body.bottom(), bounds.width, SECTION_FOOTER_HEIGHT));
        let bottom = footer.map_or(body.bottom(), |f| f.bottom());

        SectionLayout {
            bounds: Bounds::new(bounds.x, bounds.y, bounds.width, bottom - bounds.y),
            header,
            body,
            drop_target,
            footer,
        }
    }

    /// Size this section wants at `width`
    pub fn size(&self, width: f32) -> Size {
        self.layout(Bounds::new(0.0, 0.0, width, 0.0)).bounds.size()
    }

    fn items_view(&self, drop_visible: bool) -> ItemsView<'_, I> {
        ItemsView {
            items: &self.content.items,
            empty_placeholder: self
                .content
                .items
                .is_empty()
                .then_some(self.content.empty_placeholder.as_str()),
            drop_target: DropTargetView {
                height: self.content.drop_target_height,
                placeholder: self.content.drop_placeholder.as_deref(),
                visible: drop_visible,
            },
            align: self.content.alignment.items,
            scrollable: self.is_scrollable(),
        }
    }

    /// Describe what to draw. Pure given the current state and animation.
    pub fn view(&self) -> SectionView<'_, I> {
        let expanded = self.is_expanded();
        let factor = self.animator.height_factor();
        let decoration = &self.content.decoration;

        let leading = match &self.content.leading {
            LeadingControl::Chevron => LeadingView::Chevron {
                turns: CHEVRON_EXPANDED_TURNS * factor,
            },
            LeadingControl::Custom(control) => LeadingView::Custom(control),
            LeadingControl::Hidden => LeadingView::Hidden,
        };

        let body = if expanded {
            BodyView::Expanded(self.items_view(true))
        } else {
            BodyView::Collapsed(CollapsedOverlay {
                frozen: (!self.animator.content_detached()).then(|| self.items_view(false)),
                hover_layer: HoverLayerView {
                    armed: self.hover_timer.is_armed(),
                    highlight: self
                        .hover_timer
                        .is_armed()
                        .then_some(decoration.hover_highlight),
                },
            })
        };

        SectionView {
            id: self.state.id(),
            header: HeaderView {
                title: &self.content.header,
                leading,
                align: self.content.alignment.header,
                hovered: self.hover_header,
                background: if self.hover_header {
                    decoration.header_hover
                } else {
                    decoration.header_bg
                },
                text_color: decoration.header_text_color,
            },
            body,
            footer: self.current_footer(),
            height_factor: factor,
            content_bg: decoration.content_bg,
            border_color: decoration.border_color,
            corner_radius: decoration.corner_radius,
            borders: self.content.borders,
        }
    }
}

impl<I: Clone, M> CollapsibleSection<I, M> {
    /// Handle an input or drag event, optionally producing a host message.
    ///
    /// `bounds` is where the section was laid out this frame.
    pub fn on_event(&mut self, event: &Event<I>, bounds: Bounds, now: Instant) -> Option<M> {
        if self.disposed {
            return None;
        }

        let layout = self.layout(bounds);

        match event {
            Event::MousePress {
                button: MouseButton::Left,
                position,
            } => {
                if layout.header.contains_point(*position) {
                    log::debug!("CollapsibleSection '{}': header clicked", self.id());
                    let target = !self.is_expanded();
                    return self.apply(target, ChangeSource::User);
                }
            }

            Event::MouseMove { position } => {
                self.hover_header = layout.header.contains_point(*position);
            }

            Event::KeyPress { key } => {
                if self.hover_header && matches!(key, KeyCode::Enter | KeyCode::Space) {
                    let target = !self.is_expanded();
                    return self.apply(target, ChangeSource::User);
                }
            }

            Event::DragMove { position } => {
                let inside = layout.bounds.contains_point(*position);
                if inside != self.drag_inside {
                    self.drag_inside = inside;
                    log::trace!(
                        "CollapsibleSection '{}': drag {}",
                        self.id(),
                        if inside { "entered" } else { "left" }
                    );
                }

                if !inside {
                    self.hover_timer.cancel();
                } else if !self.is_expanded() {
                    // Also covers a payload that was already inside when the section collapsed.
                    // An armed timer keeps its original deadline.
                    self.hover_timer.arm(now);
                }
            }

            Event::DragLeave => {
                self.drag_inside = false;
                self.hover_timer.cancel();
            }

            Event::Drop { item, position } => {
                self.drag_inside = false;
                // Cancel before delivering so a pending auto-expand cannot race the drop
                self.hover_timer.cancel();

                let accepts = if self.is_expanded() {
                    layout.drop_target.contains_point(*position)
                } else {
                    layout.bounds.contains_point(*position)
                };
                if accepts {
                    log::debug!("CollapsibleSection '{}': item dropped", self.id());
                    return self.on_item_dropped.call(DroppedItem {
                        item: item.clone(),
                        section: self.id().clone(),
                    });
                }
            }

            _ => {}
        }

        None
    }
}

impl<I, M> Drop for CollapsibleSection<I, M> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<I, M> std::fmt::Debug for CollapsibleSection<I, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollapsibleSection")
            .field("state", &self.state)
            .field("animator", &self.animator)
            .field("hover_timer", &self.hover_timer)
            .field("items", &self.content.items.len())
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::cell::RefCell;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    enum Msg {
        Changed(bool),
        Dropped(DroppedItem<u32>),
    }

    const BOUNDS: Bounds = Bounds {
        x: 0.0,
        y: 0.0,
        width: 200.0,
        height: 0.0,
    };

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn config(id: &str, expanded: bool) -> SectionConfig<u32, Msg> {
        SectionConfig::new()
            .id(id)
            .header("Backlog")
            .initially_expanded(expanded)
            .items(vec![1, 2, 3])
            .on_expansion_changed(Msg::Changed)
            .on_item_dropped(Msg::Dropped)
    }

    fn section(expanded: bool) -> CollapsibleSection<u32, Msg> {
        config("backlog", expanded)
            .build(Rc::new(MemoryStore::new()))
            .expect("valid config")
    }

    /// A point inside the header of a section laid out at `BOUNDS`
    fn header_point() -> (f32, f32) {
        (20.0, SECTION_HEADER_HEIGHT / 2.0)
    }

    fn settle(section: &mut CollapsibleSection<u32, Msg>, from: Instant) -> Instant {
        let mut now = from;
        section.tick(now);
        for _ in 0..30 {
            now += ms(16);
            section.tick(now);
        }
        now
    }

    #[test]
    fn test_fold_over_command_sequences() {
        // Every sequence of up to 6 commands from both initial states
        #[derive(Clone, Copy)]
        enum Op {
            Expand,
            Collapse,
            Toggle,
        }
        let ops = [Op::Expand, Op::Collapse, Op::Toggle];

        for initial in [false, true] {
            for len in 0..=6u32 {
                for code in 0..3usize.pow(len) {
                    let mut s = section(initial);
                    let t0 = Instant::now();
                    let mut expected = initial;
                    let mut c = code;
                    for step in 0..len {
                        let op = ops[c % 3];
                        c /= 3;
                        match op {
                            Op::Expand => {
                                s.expand();
                                expected = true;
                            }
                            Op::Collapse => {
                                s.collapse();
                                expected = false;
                            }
                            Op::Toggle => {
                                s.toggle();
                                expected = !expected;
                            }
                        }
                        // Interleave partial animation frames
                        s.tick(t0 + ms(u64::from(step) * 30));
                    }
                    assert_eq!(s.is_expanded(), expected);
                }
            }
        }
    }

    #[test]
    fn test_noop_commands_do_not_notify() {
        let mut s = section(true);
        assert_eq!(s.expand(), None);

        let mut s = section(false);
        assert_eq!(s.collapse(), None);

        assert_eq!(s.expand(), Some(Msg::Changed(true)));
        assert_eq!(s.expand(), None);
        assert_eq!(s.toggle(), Some(Msg::Changed(false)));
        assert_eq!(s.collapse(), None);
    }

    #[test]
    fn test_state_listener_sees_every_transition() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut s = config("listener", false)
            .on_state_change({
                let seen = Rc::clone(&seen);
                move |v| seen.borrow_mut().push(v)
            })
            .build(Rc::new(MemoryStore::new()))
            .expect("valid config");

        s.expand();
        s.expand();
        s.toggle();
        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn test_hover_canceled_before_delay_never_expands() {
        let t0 = Instant::now();
        let mut s = section(false);

        s.on_event(&Event::DragMove { position: (50.0, 10.0) }, BOUNDS, t0);
        assert!(s.hover_armed());
        assert_eq!(s.tick(t0 + ms(200)), None);

        // Leave the bounds at 300ms
        s.on_event(&Event::DragMove { position: (50.0, 500.0) }, BOUNDS, t0 + ms(300));
        assert!(!s.hover_armed());

        assert_eq!(s.tick(t0 + ms(1000)), None);
        assert!(!s.is_expanded());
    }

    #[test]
    fn test_drag_leave_cancels_hover() {
        let t0 = Instant::now();
        let mut s = section(false);
        s.on_event(&Event::DragMove { position: (50.0, 10.0) }, BOUNDS, t0);
        s.on_event(&Event::DragLeave, BOUNDS, t0 + ms(100));
        assert_eq!(s.tick(t0 + ms(600)), None);
        assert!(!s.is_expanded());
    }

    #[test]
    fn test_hover_uninterrupted_expands_exactly_once() {
        let t0 = Instant::now();
        let mut s = section(false);
        s.on_event(&Event::DragMove { position: (50.0, 10.0) }, BOUNDS, t0);

        assert_eq!(s.tick(t0 + ms(399)), None);
        assert_eq!(s.tick(t0 + ms(400)), Some(Msg::Changed(true)));
        assert!(s.is_expanded());
        assert!(!s.hover_armed());

        for i in 1..20 {
            assert_eq!(s.tick(t0 + ms(400 + i * 16)), None);
        }
    }

    #[test]
    fn test_moving_within_section_does_not_rearm() {
        let t0 = Instant::now();
        let mut s = section(false);
        s.on_event(&Event::DragMove { position: (50.0, 10.0) }, BOUNDS, t0);
        s.on_event(&Event::DragMove { position: (60.0, 12.0) }, BOUNDS, t0 + ms(300));
        // Original window still fires at 400ms
        assert_eq!(s.tick(t0 + ms(400)), Some(Msg::Changed(true)));
    }

    #[test]
    fn test_drop_at_399ms_delivers_without_auto_expand() {
        let t0 = Instant::now();
        let mut s = section(false);
        s.on_event(&Event::DragMove { position: (50.0, 10.0) }, BOUNDS, t0);

        let msg = s.on_event(
            &Event::Drop {
                item: 42,
                position: (50.0, 10.0),
            },
            BOUNDS,
            t0 + ms(399),
        );
        assert_eq!(
            msg,
            Some(Msg::Dropped(DroppedItem {
                item: 42,
                section: SectionId::from("backlog"),
            }))
        );
        assert!(!s.hover_armed());

        assert_eq!(s.tick(t0 + ms(400)), None);
        assert_eq!(s.tick(t0 + ms(2000)), None);
        assert!(!s.is_expanded());
    }

    #[test]
    fn test_hover_does_not_arm_while_expanded() {
        let t0 = Instant::now();
        let mut s = section(true);
        s.on_event(&Event::DragMove { position: (50.0, 10.0) }, BOUNDS, t0);
        assert!(!s.hover_armed());
    }

    #[test]
    fn test_programmatic_expand_cancels_armed_hover() {
        let t0 = Instant::now();
        let mut s = section(false);
        s.on_event(&Event::DragMove { position: (50.0, 10.0) }, BOUNDS, t0);
        assert_eq!(s.expand(), Some(Msg::Changed(true)));
        assert!(!s.hover_armed());

        // Collapsing alone does not arm the timer; only the next drag move does
        s.collapse();
        assert_eq!(s.tick(t0 + ms(500)), None);
        assert!(!s.is_expanded());
    }

    #[test]
    fn test_payload_lingering_through_collapse_auto_expands() {
        let t0 = Instant::now();
        let mut s = section(true);
        s.on_event(&Event::DragMove { position: (50.0, 10.0) }, BOUNDS, t0);
        assert!(!s.hover_armed());

        assert_eq!(s.collapse(), Some(Msg::Changed(false)));
        let collapsed_at = t0 + ms(100);

        // Keep hovering: the first move after the collapse opens the window
        let mut fired = Vec::new();
        for i in 0..40u64 {
            let now = collapsed_at + ms(i * 16);
            s.on_event(&Event::DragMove { position: (50.0, 12.0) }, BOUNDS, now);
            fired.extend(s.tick(now));
        }

        assert_eq!(fired, vec![Msg::Changed(true)]);
        assert!(s.is_expanded());
        assert!(!s.hover_armed());
    }

    #[test]
    fn test_drop_target_never_overlaps_header() {
        let t0 = Instant::now();
        let mut s = config("short", true)
            .max_content_height(20.0)
            .build(Rc::new(MemoryStore::new()))
            .expect("valid");

        let layout = s.layout(BOUNDS);
        assert_eq!(layout.drop_target.height, layout.body.height);
        assert_eq!(layout.drop_target.y, layout.header.bottom());

        assert_eq!(
            s.on_event(
                &Event::Drop {
                    item: 5,
                    position: (10.0, SECTION_HEADER_HEIGHT / 2.0),
                },
                BOUNDS,
                t0,
            ),
            None
        );
        assert!(s
            .on_event(
                &Event::Drop {
                    item: 5,
                    position: (10.0, layout.body.y + 10.0),
                },
                BOUNDS,
                t0,
            )
            .is_some());
    }

    #[test]
    fn test_expanded_drop_only_on_drop_target() {
        let t0 = Instant::now();
        let mut s = section(true);
        let layout = s.layout(BOUNDS);

        // On the first item row: the item handles reordering, not the section
        let on_item = (10.0, layout.body.y + 1.0);
        assert_eq!(
            s.on_event(&Event::Drop { item: 7, position: on_item }, BOUNDS, t0),
            None
        );

        let on_target = (10.0, layout.drop_target.y + 1.0);
        assert!(matches!(
            s.on_event(&Event::Drop { item: 7, position: on_target }, BOUNDS, t0),
            Some(Msg::Dropped(DroppedItem { item: 7, .. }))
        ));
    }

    #[test]
    fn test_collapsed_drop_anywhere_in_section() {
        let t0 = Instant::now();
        let mut s = section(false);
        let msg = s.on_event(
            &Event::Drop {
                item: 9,
                position: header_point(),
            },
            BOUNDS,
            t0,
        );
        assert!(matches!(msg, Some(Msg::Dropped(_))));

        let outside = s.on_event(
            &Event::Drop {
                item: 9,
                position: (50.0, 900.0),
            },
            BOUNDS,
            t0,
        );
        assert_eq!(outside, None);
    }

    #[test]
    fn test_header_click_and_key_toggle() {
        let t0 = Instant::now();
        let mut s = section(false);

        let click = Event::MousePress {
            button: MouseButton::Left,
            position: header_point(),
        };
        assert_eq!(s.on_event(&click, BOUNDS, t0), Some(Msg::Changed(true)));

        // Right clicks are ignored
        let right = Event::MousePress {
            button: MouseButton::Right,
            position: header_point(),
        };
        assert_eq!(s.on_event(&right, BOUNDS, t0), None);

        // Keys only toggle while the header is hovered
        let enter = Event::KeyPress { key: KeyCode::Enter };
        assert_eq!(s.on_event(&enter, BOUNDS, t0), None);
        s.on_event(
            &Event::MouseMove {
                position: header_point(),
            },
            BOUNDS,
            t0,
        );
        assert!(s.view().header.hovered);
        assert_eq!(s.on_event(&enter, BOUNDS, t0), Some(Msg::Changed(false)));
    }

    #[test]
    fn test_persisted_state_round_trip() {
        let store: Rc<MemoryStore> = Rc::new(MemoryStore::new());

        let mut first = config("k", false).build(store.clone()).expect("valid");
        assert_eq!(first.post_render(), None);
        assert_eq!(first.expand(), Some(Msg::Changed(true)));
        first.dispose();
        drop(first);

        // Stated default true: restored value matches, nothing deferred
        let mut agree = config("k", true).build(store.clone()).expect("valid");
        assert!(agree.is_expanded());
        assert!(agree.is_settled());
        assert_eq!(agree.post_render(), None);
        drop(agree);

        // Stated default false: persisted value wins, announced once after first render
        let mut differ = config("k", false).build(store.clone()).expect("valid");
        assert!(differ.is_expanded());
        assert_eq!(differ.post_render(), Some(Msg::Changed(true)));
        assert_eq!(differ.post_render(), None);

        // A different identity starts fresh
        let other = config("other", false).build(store.clone()).expect("valid");
        assert!(!other.is_expanded());
    }

    #[test]
    fn test_mount_notice_dropped_after_real_transition() {
        let store: Rc<MemoryStore> = Rc::new(MemoryStore::new());
        store.write(&SectionId::from("k"), true);

        let mut s = config("k", false).build(store.clone()).expect("valid");
        assert_eq!(s.collapse(), Some(Msg::Changed(false)));
        assert_eq!(s.post_render(), None);
    }

    #[test]
    fn test_reversal_mid_animation_settles_on_final_state() {
        let t0 = Instant::now();
        let mut s = section(false);
        s.expand();
        s.tick(t0);
        s.tick(t0 + ms(80));
        assert!(!s.is_settled());

        s.collapse();
        let mut now = t0 + ms(80);
        for _ in 0..30 {
            now += ms(16);
            s.tick(now);
            let p = s.animator().progress();
            assert!((0.0..=1.0).contains(&p));
        }
        assert!(s.is_settled());
        assert_eq!(s.animator().progress(), 0.0);
        assert!(!s.is_expanded());
    }

    #[test]
    fn test_expanded_view_regions() {
        let s = config("v", true)
            .footer("3 cards")
            .collapsed_footer("collapsed")
            .build(Rc::new(MemoryStore::new()))
            .expect("valid");
        let view = s.view();

        assert!(view.is_expanded());
        assert_eq!(view.footer, Some("3 cards"));
        assert_eq!(view.height_factor, 1.0);
        assert_eq!(view.header.leading, LeadingView::Chevron { turns: 0.5 });
        let items = view.items().expect("items visible");
        assert_eq!(items.items, &[1, 2, 3]);
        assert_eq!(items.empty_placeholder, None);
        assert!(items.drop_target.visible);
        assert_eq!(view.borders, Borders::BOTH);
    }

    #[test]
    fn test_collapsed_view_freezes_until_settled() {
        let t0 = Instant::now();
        let mut s = config("v", true)
            .footer("3 cards")
            .build(Rc::new(MemoryStore::new()))
            .expect("valid");
        s.collapse();

        {
            let view = s.view();
            assert!(!view.is_expanded());
            // Regular footer stands in for a missing collapsed footer
            assert_eq!(view.footer, Some("3 cards"));
            match &view.body {
                BodyView::Collapsed(overlay) => {
                    let frozen = overlay.frozen.as_ref().expect("frozen while animating");
                    assert!(!frozen.drop_target.visible);
                    assert!(!overlay.hover_layer.armed);
                }
                BodyView::Expanded(_) => panic!("expected collapsed body"),
            }
        }

        settle(&mut s, t0);
        let view = s.view();
        match &view.body {
            BodyView::Collapsed(overlay) => assert!(overlay.frozen.is_none()),
            BodyView::Expanded(_) => panic!("expected collapsed body"),
        }
        assert_eq!(view.height_factor, 0.0);
        assert!(view.items().is_none());
    }

    #[test]
    fn test_collapsed_view_reports_armed_hover() {
        let t0 = Instant::now();
        let decoration = Decoration::default();
        let mut s = section(false);

        match s.view().body {
            BodyView::Collapsed(overlay) => assert_eq!(overlay.hover_layer.highlight, None),
            BodyView::Expanded(_) => panic!("expected collapsed body"),
        }

        s.on_event(&Event::DragMove { position: (50.0, 10.0) }, BOUNDS, t0);
        match s.view().body {
            BodyView::Collapsed(overlay) => {
                assert!(overlay.hover_layer.armed);
                assert_eq!(
                    overlay.hover_layer.highlight,
                    Some(decoration.hover_highlight)
                );
            }
            BodyView::Expanded(_) => panic!("expected collapsed body"),
        }
    }

    #[test]
    fn test_view_resolves_decoration() {
        let t0 = Instant::now();
        let decoration = Decoration {
            corner_radius: 4.0,
            ..Decoration::default()
        };
        let mut s = config("styled", true)
            .decoration(decoration.clone())
            .build(Rc::new(MemoryStore::new()))
            .expect("valid");

        {
            let view = s.view();
            assert_eq!(view.header.background, decoration.header_bg);
            assert_eq!(view.header.text_color, decoration.header_text_color);
            assert_eq!(view.content_bg, decoration.content_bg);
            assert_eq!(view.border_color, decoration.border_color);
            assert_eq!(view.corner_radius, 4.0);
        }

        s.on_event(
            &Event::MouseMove {
                position: header_point(),
            },
            BOUNDS,
            t0,
        );
        assert_eq!(s.view().header.background, decoration.header_hover);
    }

    #[test]
    fn test_empty_section_keeps_placeholder_and_drop_target() {
        let t0 = Instant::now();
        let mut s: CollapsibleSection<u32, Msg> = SectionConfig::new()
            .id("empty")
            .header("Empty")
            .initially_expanded(true)
            .empty_placeholder("Drop cards here")
            .on_item_dropped(Msg::Dropped)
            .build(Rc::new(MemoryStore::new()))
            .expect("valid");

        {
            let view = s.view();
            let items = view.items().expect("expanded");
            assert!(items.is_empty());
            assert_eq!(items.empty_placeholder, Some("Drop cards here"));
            assert!(items.drop_target.visible);
        }

        let layout = s.layout(BOUNDS);
        assert!(layout.drop_target.height > 0.0);
        let pos = (10.0, layout.drop_target.y + 1.0);
        assert!(s
            .on_event(&Event::Drop { item: 1, position: pos }, BOUNDS, t0)
            .is_some());
    }

    #[test]
    fn test_layout_scales_with_animation() {
        let t0 = Instant::now();
        let mut s = section(false);
        let collapsed = s.size(200.0);
        assert_eq!(collapsed.height, SECTION_HEADER_HEIGHT);

        s.expand();
        s.tick(t0);
        s.tick(t0 + ms(100));
        let mid = s.size(200.0).height;

        settle(&mut s, t0 + ms(100));
        let full = s.size(200.0).height;
        assert!(collapsed.height < mid && mid < full);
        assert_eq!(
            full,
            SECTION_HEADER_HEIGHT + (3.0 * DEFAULT_ITEM_EXTENT + DEFAULT_DROP_TARGET_HEIGHT)
        );
    }

    #[test]
    fn test_max_content_height_makes_items_scrollable() {
        let s = config("scroll", true)
            .max_content_height(50.0)
            .build(Rc::new(MemoryStore::new()))
            .expect("valid");
        assert!(s.view().items().is_some_and(|i| i.scrollable));
        assert_eq!(s.size(200.0).height, SECTION_HEADER_HEIGHT + 50.0);
    }

    #[test]
    fn test_suppress_borders_and_custom_leading() {
        let s = config("b", false)
            .suppress_borders(true)
            .leading(LeadingControl::Custom("grip".to_string()))
            .build(Rc::new(MemoryStore::new()))
            .expect("valid");
        let view = s.view();
        assert_eq!(view.borders, Borders::NONE);
        assert_eq!(view.header.leading, LeadingView::Custom("grip"));
    }

    #[test]
    fn test_dispose_is_idempotent_and_silences_everything() {
        let t0 = Instant::now();
        let mut s = section(false);
        s.on_event(&Event::DragMove { position: (50.0, 10.0) }, BOUNDS, t0);

        s.dispose();
        s.dispose();
        assert!(s.is_disposed());
        assert!(!s.hover_armed());
        assert_eq!(s.tick(t0 + ms(1000)), None);
        assert_eq!(s.expand(), None);
        assert_eq!(s.post_render(), None);
        assert_eq!(
            s.on_event(
                &Event::Drop {
                    item: 1,
                    position: (50.0, 10.0),
                },
                BOUNDS,
                t0,
            ),
            None
        );
        assert!(!s.is_expanded());
    }

    #[test]
    fn test_build_rejects_incomplete_config() {
        let store: Rc<MemoryStore> = Rc::new(MemoryStore::new());

        let missing_id = SectionConfig::<u32, Msg>::new().header("x").build(store.clone());
        assert_eq!(
            missing_id.err(),
            Some(ConfigError::MissingField { field: "id" })
        );

        let missing_header = SectionConfig::<u32, Msg>::new().id("x").build(store.clone());
        assert_eq!(
            missing_header.err(),
            Some(ConfigError::MissingField { field: "header" })
        );

        let empty_id = SectionConfig::<u32, Msg>::new()
            .id("")
            .header("x")
            .build(store.clone());
        assert_eq!(empty_id.err(), Some(ConfigError::EmptyId));

        let bad_extent = SectionConfig::<u32, Msg>::new()
            .id("x")
            .header("x")
            .drop_target_height(f32::NAN)
            .build(store.clone());
        assert!(matches!(
            bad_extent.err(),
            Some(ConfigError::InvalidExtent {
                field: "drop_target_height",
                ..
            })
        ));
    }
}
