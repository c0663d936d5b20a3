//! Colors and section decoration

/// An RGBA color with components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TEXT_PRIMARY: Color = Color::rgba(0.9, 0.9, 0.92, 1.0);
    pub const BORDER: Color = Color::rgba(0.3, 0.3, 0.35, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Visual decoration of a section
#[derive(Debug, Clone, PartialEq)]
pub struct Decoration {
    /// Header background color
    pub header_bg: Color,
    /// Header background while hovered
    pub header_hover: Color,
    /// Header text color
    pub header_text_color: Color,
    /// Item area background color
    pub content_bg: Color,
    /// Color of the top/bottom borders
    pub border_color: Color,
    /// Highlight drawn over a collapsed section while a hover is armed
    pub hover_highlight: Color,
    /// Corner radius of the section frame
    pub corner_radius: f32,
}

impl Default for Decoration {
    fn default() -> Self {
        Self {
            header_bg: Color::rgba(0.15, 0.15, 0.18, 1.0),
            header_hover: Color::rgba(0.2, 0.2, 0.24, 1.0),
            header_text_color: Color::TEXT_PRIMARY,
            content_bg: Color::rgba(0.12, 0.12, 0.14, 1.0),
            border_color: Color::BORDER,
            hover_highlight: Color::rgba(0.3, 0.5, 0.9, 0.25),
            corner_radius: 0.0,
        }
    }
}

/// Which default borders a section draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Borders {
    pub top: bool,
    pub bottom: bool,
}

impl Borders {
    pub const BOTH: Self = Self {
        top: true,
        bottom: true,
    };
    pub const NONE: Self = Self {
        top: false,
        bottom: false,
    };
}

impl Default for Borders {
    fn default() -> Self {
        Self::BOTH
    }
}
