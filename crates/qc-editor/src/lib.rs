pub mod cancel;
pub mod element;
pub mod engine;
pub mod events;
pub mod hit;
pub mod input;
pub mod scheduler;
pub mod shape_editor;
pub mod shortcuts;
pub mod surface;
pub mod viewport;
pub mod zorder;

pub use cancel::{CancelSource, CancelToken};
pub use element::{DraggableElement, ElementCommit, ElementState};
pub use engine::CanvasEngine;
pub use events::{CanvasEvent, CanvasHost, dispatch};
pub use input::{InputEvent, Modifiers};
pub use shape_editor::{EditorState, ShapeAnchorEditor};
pub use surface::{CanvasSurface, DropItem};
pub use viewport::DisplayTransform;
