/// Monotonic stacking counter shared by every widget on one canvas.
///
/// Pressing a widget raises it by assigning the next value; values are never
/// reused, so the last-touched widget is always on top.
#[derive(Debug, Clone, Default)]
pub struct ZOrder {
    top: i64,
}

impl ZOrder {
    /// Continue counting above the highest loaded value.
    pub fn from_max(max: i64) -> Self {
        Self { top: max.max(0) }
    }

    /// Read-then-increment.
    pub fn bump(&mut self) -> i64 {
        self.top += 1;
        self.top
    }

    pub fn top(&self) -> i64 {
        self.top
    }
}
