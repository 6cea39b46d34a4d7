//! Data model: pixel grids, layers, frames and the animation document

mod animation;
mod error;
mod frame;
mod grid;
mod layer;

// Re-export all public types
pub use animation::Animation;
pub use error::EditError;
pub use frame::{Frame, LayerMove};
pub use grid::{Canvas, PixelGrid, CANVAS_HEIGHT, CANVAS_WIDTH};
pub use layer::{Layer, ShiftDirection};
