//! Global interaction cancellation.
//!
//! The host keeps a `CancelSource` and fires it from its window-level
//! `mouseup` / `touchend` / `touchcancel` listeners, so a pointer released
//! outside the canvas still ends the session. Each session subscribes once
//! by taking a `CancelToken`; dropping the token is the unsubscribe.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub struct CancelSource {
    generation: Rc<Cell<u64>>,
}

impl CancelSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel every token handed out so far.
    pub fn cancel(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
        log::debug!("cancel: global cancel fired");
    }

    /// A token that observes cancels fired after this call.
    pub fn token(&self) -> CancelToken {
        CancelToken {
            generation: Rc::clone(&self.generation),
            seen: self.generation.get(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CancelToken {
    generation: Rc<Cell<u64>>,
    seen: u64,
}

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        self.generation.get() != self.seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_later_cancels_are_observed() {
        let source = CancelSource::new();
        source.cancel();
        let token = source.token();
        assert!(!token.is_cancelled());

        let host_side = source.clone();
        host_side.cancel();
        assert!(token.is_cancelled());
        assert!(!source.token().is_cancelled());
    }
}
