//! inkmark Core Library
//!
//! Platform-agnostic freehand annotation engine: stroke capture from touch
//! samples, smoothing, tool policy, eraser and undo/redo history.

pub mod canvas;
pub mod config;
pub mod geometry;
pub mod history;
pub mod input;
pub mod session;
pub mod smoothing;
pub mod stroke;
pub mod tools;

pub use canvas::StrokeCollection;
pub use config::{ConfigError, ConfigResult, EngineConfig};
pub use history::HistoryLog;
pub use input::{ClassifierConfig, InputClassifier, TouchKind, TouchSample};
pub use session::{DrawingSession, GestureState, RenderModel, TouchOutcome};
pub use smoothing::{reduce_density, smooth};
pub use stroke::{EmptyStrokeError, InkPoint, Stroke, StrokeId};
pub use tools::{SerializableColor, ToolKind, ToolPalette, ToolStyle};
