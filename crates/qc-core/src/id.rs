use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for widget IDs.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Stable, externally assigned widget identifier.
/// Interned so it is `Copy` and compares in O(1).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(Spur);

impl WidgetId {
    /// Intern a string as a WidgetId, or return the existing one.
    pub fn intern(s: &str) -> Self {
        WidgetId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Whether the underlying string is empty (host forgot to assign one).
    pub fn is_blank(&self) -> bool {
        self.as_str().trim().is_empty()
    }

    /// Generate a unique ID with a type prefix (e.g. `slider_3`).
    pub fn with_prefix(prefix: &str) -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        loop {
            let n = COUNTER.fetch_add(1, Ordering::Relaxed);
            let candidate = format!("{prefix}_{n}");
            // Host-assigned ids may already use the same pattern.
            if INTERNER.get(&candidate).is_none() {
                return Self::intern(&candidate);
            }
        }
    }
}

impl fmt::Debug for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for WidgetId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for WidgetId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(WidgetId::intern(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = WidgetId::intern("question_1");
        let b = WidgetId::intern("question_1");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "question_1");
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = WidgetId::with_prefix("slider");
        let b = WidgetId::with_prefix("slider");
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("slider_"));
    }

    #[test]
    fn generated_ids_skip_taken_names() {
        let taken = WidgetId::with_prefix("dup");
        let n: u64 = taken.as_str()["dup_".len()..].parse().unwrap_or(0);
        WidgetId::intern(&format!("dup_{}", n + 1));
        let next = WidgetId::with_prefix("dup");
        assert_ne!(next.as_str(), format!("dup_{}", n + 1));
    }

    #[test]
    fn blank_ids_are_detected() {
        assert!(WidgetId::intern("  ").is_blank());
        assert!(!WidgetId::intern("w").is_blank());
    }
}
