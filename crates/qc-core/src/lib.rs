pub mod bezier;
pub mod config;
pub mod error;
pub mod geom;
pub mod id;
pub mod model;
pub mod outline;
pub mod text_fit;

pub use bezier::{HandlePair, HandleSide};
pub use config::{CanvasConfig, EngineConfig, FitConfig, ShapeConfig};
pub use error::CanvasError;
pub use geom::{Point, Rect, Size};
pub use id::WidgetId;
pub use model::*;
pub use outline::ShapeOutline;
pub use text_fit::{FitResult, HeuristicMeasurer, TextFitEngine, TextMeasurer};
