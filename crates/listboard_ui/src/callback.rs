//! Callback abstraction for section notifications
//!
//! Sections talk to their host in two ways:
//!
//! - [`Callback<T, M>`] turns a value (the new expansion flag, a dropped item)
//!   into a host message. The section returns that message from the operation
//!   that caused it, so the host decides when to handle it.
//! - [`Listener<T>`] is a synchronous side-effect hook that produces no message,
//!   used by [`ExpansionState`](crate::ExpansionState) to announce changes the
//!   moment they are applied.
//!
//! # Examples
//!
//! ```ignore
//! use listboard_ui::Callback;
//!
//! enum Message {
//!     Toggled(bool),
//! }
//!
//! let callback = Callback::new(Message::Toggled);
//! assert!(matches!(callback.call(true), Some(Message::Toggled(true))));
//! ```

use std::fmt;

/// A callback wrapper that encapsulates an optional message producer.
///
/// # Type Parameters
///
/// - `T`: The input type for the callback (expansion flag, dropped item, ...)
/// - `M`: The message type returned by the callback
pub struct Callback<T, M> {
    f: Option<Box<dyn Fn(T) -> M>>,
}

impl<T, M> Callback<T, M> {
    /// Create a new callback from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(T) -> M + 'static,
    {
        Self {
            f: Some(Box::new(f)),
        }
    }

    /// Create an empty callback (no handler).
    pub fn none() -> Self {
        Self { f: None }
    }

    /// Call the callback with a value, if it exists.
    ///
    /// Returns `Some(message)` if the callback is set, or `None` if no callback is registered.
    pub fn call(&self, value: T) -> Option<M> {
        self.f.as_ref().map(|f| f(value))
    }

    /// Check if the callback is set.
    pub fn is_some(&self) -> bool {
        self.f.is_some()
    }

    /// Check if the callback is not set.
    pub fn is_none(&self) -> bool {
        self.f.is_none()
    }
}

impl<T, M> Default for Callback<T, M> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T, M> fmt::Debug for Callback<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("set", &self.is_some())
            .finish()
    }
}

// =============================================================================
// Side-effect Listener
// =============================================================================

/// A side-effect callback that doesn't return a message.
///
/// At most one listener is registered at a time; registering a new one
/// replaces the previous.
pub struct Listener<T> {
    f: Option<Box<dyn Fn(T)>>,
}

impl<T> Listener<T> {
    /// Create a new listener from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(T) + 'static,
    {
        Self {
            f: Some(Box::new(f)),
        }
    }

    /// Create an empty listener.
    pub fn none() -> Self {
        Self { f: None }
    }

    /// Invoke the listener, if it exists.
    pub fn emit(&self, value: T) {
        if let Some(ref f) = self.f {
            f(value);
        }
    }

    /// Check if the listener is set.
    pub fn is_some(&self) -> bool {
        self.f.is_some()
    }
}

impl<T> Default for Listener<T> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T> fmt::Debug for Listener<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("set", &self.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_callback_none_produces_nothing() {
        let callback: Callback<bool, u8> = Callback::none();
        assert!(callback.is_none());
        assert_eq!(callback.call(true), None);
    }

    #[test]
    fn test_callback_maps_value() {
        let callback = Callback::new(|expanded: bool| if expanded { 1u8 } else { 0u8 });
        assert!(callback.is_some());
        assert_eq!(callback.call(true), Some(1));
        assert_eq!(callback.call(false), Some(0));
    }

    #[test]
    fn test_listener_emits() {
        let seen = Rc::new(Cell::new(0));
        let listener = {
            let seen = Rc::clone(&seen);
            Listener::new(move |v: u32| seen.set(seen.get() + v))
        };
        listener.emit(2);
        listener.emit(3);
        assert_eq!(seen.get(), 5);

        // Empty listener is a no-op
        Listener::<u32>::none().emit(7);
        assert_eq!(seen.get(), 5);
    }
}
