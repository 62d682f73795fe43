use crate::id::WidgetId;

/// Errors that cross the engine's public boundary.
///
/// Geometry problems never show up here: they are clamped in place. Only
/// calls that address a widget that does not exist, or hand over records
/// that cannot be decoded, fail.
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    #[error("unknown widget: {0}")]
    UnknownWidget(WidgetId),

    #[error("widget record is missing an id")]
    MissingId,

    #[error("invalid record: {0}")]
    InvalidRecord(#[from] serde_json::Error),
}
