//! Debounced outline refits.
//!
//! Every anchor or handle commit asks for a refit; rapid edits would
//! otherwise resize the widget repeatedly. Requests are keyed by widget:
//! a new request replaces the pending one (last request wins) and pushes
//! its deadline out by the debounce window. Time is host-supplied
//! milliseconds, so the scheduler never touches a clock.

use qc_core::WidgetId;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pending {
    id: WidgetId,
    due_ms: f64,
}

#[derive(Debug, Clone)]
pub struct RefitScheduler {
    debounce_ms: f64,
    pending: Vec<Pending>,
}

impl RefitScheduler {
    pub fn new(debounce_ms: f64) -> Self {
        Self {
            debounce_ms: if debounce_ms.is_finite() {
                debounce_ms.max(0.0)
            } else {
                0.0
            },
            pending: Vec::new(),
        }
    }

    /// Queue (or re-queue) a refit for `id`, due `debounce_ms` after `now_ms`.
    pub fn request(&mut self, id: WidgetId, now_ms: f64) {
        let due_ms = now_ms + self.debounce_ms;
        self.pending.retain(|p| p.id != id);
        self.pending.push(Pending { id, due_ms });
        log::trace!("scheduler: refit {id} due at {due_ms}");
    }

    /// Drop a pending request (widget deleted or edit cancelled).
    pub fn cancel(&mut self, id: WidgetId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        before != self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Remove and return every request whose deadline has passed, earliest
    /// first.
    pub fn due(&mut self, now_ms: f64) -> Vec<WidgetId> {
        let mut ready: Vec<Pending> = Vec::new();
        self.pending.retain(|p| {
            if p.due_ms <= now_ms {
                ready.push(*p);
                false
            } else {
                true
            }
        });
        ready.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms));
        ready.into_iter().map(|p| p.id).collect()
    }

    pub fn is_pending(&self, id: WidgetId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    /// Earliest pending deadline, for hosts that arm a timer.
    pub fn next_deadline(&self) -> Option<f64> {
        self.pending
            .iter()
            .map(|p| p.due_ms)
            .min_by(|a, b| a.total_cmp(b))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
