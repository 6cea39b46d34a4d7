//! Errors for structural edits

use thiserror::Error;

use crate::id::LayerId;

/// A rejected edit. The model is left unchanged when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// A frame must keep at least one layer
    #[error("Cannot delete the last layer of a frame")]
    LastLayer,
    /// An animation must keep at least one frame
    #[error("Cannot delete the last frame")]
    LastFrame,
    /// No layer with this id in the frame
    #[error("Layer '{0}' not found")]
    LayerNotFound(LayerId),
    /// Frame index past the end of the animation
    #[error("Frame {index} is out of range (animation has {count} frames)")]
    FrameOutOfRange { index: usize, count: usize },
    /// Frame durations must be positive
    #[error("Frame duration must be at least 1ms")]
    ZeroDuration,
}
