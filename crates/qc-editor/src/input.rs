//! Input abstraction layer.
//!
//! Normalizes mouse and touch events into a unified `InputEvent` consumed by
//! the engine. Coordinates are client (screen) pixels; the engine maps them
//! to canvas-local space through the current `DisplayTransform`.

use qc_core::Point;
use serde::Deserialize;

/// Modifier keys held during a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// ⌘ on macOS, Ctrl elsewhere.
    pub fn cmd(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A normalized input event from any pointing device or the keyboard.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum InputEvent {
    /// Pointer pressed (mouse down, touch start).
    PointerDown {
        x: f64,
        y: f64,
        /// The press landed on an interactive sub-element (a slider thumb,
        /// an answer toggle). Still raises the widget, never starts a drag.
        #[serde(default)]
        interactive: bool,
    },

    /// Pointer moved while pressed.
    PointerMove { x: f64, y: f64 },

    /// Pointer released.
    PointerUp { x: f64, y: f64 },

    /// Touch cancelled or pointer capture lost.
    PointerCancel,

    /// Key press (`KeyboardEvent.key` value).
    Key {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
}

impl InputEvent {
    pub fn pointer_down(x: f64, y: f64) -> Self {
        Self::PointerDown {
            x,
            y,
            interactive: false,
        }
    }

    pub fn pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn pointer_up(x: f64, y: f64) -> Self {
        Self::PointerUp { x, y }
    }

    pub fn key(key: impl Into<String>) -> Self {
        Self::Key {
            key: key.into(),
            modifiers: Modifiers::default(),
        }
    }

    /// Client position if this is a positioned pointer event.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown { x, y, .. } | Self::PointerMove { x, y } | Self::PointerUp { x, y } => {
                Some(Point::new(*x, *y))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_host_json() {
        let ev: InputEvent =
            serde_json::from_str(r#"{"kind": "pointerDown", "x": 4, "y": 5}"#).unwrap();
        assert_eq!(ev, InputEvent::pointer_down(4.0, 5.0));

        let key: InputEvent = serde_json::from_str(
            r#"{"kind": "key", "key": "Delete", "modifiers": {"meta": true}}"#,
        )
        .unwrap();
        let InputEvent::Key { key, modifiers } = key else {
            panic!("expected key event");
        };
        assert_eq!(key, "Delete");
        assert!(modifiers.cmd());
    }

    #[test]
    fn position_only_for_pointer_events() {
        assert_eq!(
            InputEvent::pointer_move(1.0, 2.0).position(),
            Some(Point::new(1.0, 2.0))
        );
        assert_eq!(InputEvent::PointerCancel.position(), None);
        assert_eq!(InputEvent::key("Escape").position(), None);
    }
}
