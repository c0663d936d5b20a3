//! Input and drag events delivered to sections

use crate::layout::Point;

/// Events that a section responds to.
///
/// Pointer and key events come from the windowing layer; the drag variants come
/// from the host's drag-and-drop engine and carry the payload being dragged.
#[derive(Debug, Clone)]
pub enum Event<I> {
    /// Mouse button pressed.
    MousePress { button: MouseButton, position: Point },
    /// Mouse moved.
    MouseMove { position: Point },
    /// Keyboard key pressed.
    KeyPress { key: KeyCode },
    /// A drag payload moved to `position`. Entering or leaving a section is
    /// derived from consecutive positions.
    DragMove { position: Point },
    /// The drag payload left the surface or the drag was abandoned.
    DragLeave,
    /// The drag payload was released at `position`.
    Drop { item: I, position: Point },
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Keyboard keys (simplified set).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    Space,
    Tab,
}
