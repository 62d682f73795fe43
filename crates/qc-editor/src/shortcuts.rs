//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. The map lives
//! in Rust so the browser bridge and native tests share it.

use crate::input::Modifiers;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    /// Abandon the open drag/resize/anchor session; with nothing open,
    /// clear the selection.
    CancelInteraction,
    DeleteSelected,
    BringToFront,
}

pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a `KeyboardEvent.key` value. `None` if unbound.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        if modifiers.cmd() && modifiers.shift {
            return match key {
                "]" | "}" => Some(ShortcutAction::BringToFront),
                _ => None,
            };
        }
        if modifiers.cmd() || modifiers.alt {
            return None;
        }
        match key {
            "Escape" => Some(ShortcutAction::CancelInteraction),
            "Delete" | "Backspace" => Some(ShortcutAction::DeleteSelected),
            _ => None,
        }
    }
}
