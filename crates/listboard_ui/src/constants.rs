//! Centralized constants for listboard_ui
//!
//! Timing and default extents shared by the section widget and its parts.

use std::time::Duration;

// =============================================================================
// Timing
// =============================================================================

/// Duration of the expand/collapse height transition
pub const EXPAND_ANIMATION_DURATION: Duration = Duration::from_millis(200);

/// How long a drag payload must linger over a collapsed section before it auto-expands
pub const HOVER_EXPAND_DELAY: Duration = Duration::from_millis(400);

// =============================================================================
// Typography
// =============================================================================

/// Default font size used for header and item text
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

/// Line height as a ratio of font size
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Compact vertical padding around a row of text
pub const PADDING_COMPACT: f32 = 6.0;

// =============================================================================
// Section
// =============================================================================

/// Height of the section header row
pub const SECTION_HEADER_HEIGHT: f32 = 32.0;

/// Height of the footer (or collapsed footer) row
pub const SECTION_FOOTER_HEIGHT: f32 = 24.0;

/// Default height of one item row
/// Derived from: line_height(DEFAULT_FONT_SIZE) + PADDING_COMPACT * 2.0
pub const DEFAULT_ITEM_EXTENT: f32 = DEFAULT_FONT_SIZE * LINE_HEIGHT_FACTOR + PADDING_COMPACT * 2.0;

/// Default height of the terminal drop target
pub const DEFAULT_DROP_TARGET_HEIGHT: f32 = 40.0;

/// Text shown in place of the items when a section has none
pub const DEFAULT_EMPTY_PLACEHOLDER: &str = "No items";

/// Rotation of the disclosure chevron when fully expanded, in turns
pub const CHEVRON_EXPANDED_TURNS: f32 = 0.5;

// =============================================================================
// Tolerances
// =============================================================================

/// Epsilon for float comparisons
pub const FLOAT_EPSILON: f32 = 0.0001;
