//! Animation export pipeline
//!
//! Composites every frame, turns each composite into a row-major RGBA
//! buffer, and hands the buffers to a [`FrameEncoder`] one call per frame in
//! animation order, followed by a single `finish` call. Palette reduction,
//! compression and container framing are the encoder's job.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::composition::composite_frame;
use crate::models::Animation;
use crate::output::{export_file_name, write_export, OutputError};

/// Loop directive attached to the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Loop forever
    Infinite,
    /// Play once and stop on the last frame
    Once,
}

impl Repeat {
    pub fn from_loop(loop_playback: bool) -> Self {
        if loop_playback {
            Repeat::Infinite
        } else {
            Repeat::Once
        }
    }
}

/// Error raised by an encoding collaborator
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    /// Buffer length does not match width * height * 4
    #[error("Frame buffer holds {actual} bytes, expected {expected} for {width}x{height}")]
    Dimensions { width: u32, height: u32, expected: usize, actual: usize },
    /// `finish` called before any frame was added
    #[error("No frames to encode")]
    NoFrames,
    /// Any other failure reported by an encoder implementation
    #[error("{0}")]
    Other(String),
}

/// Error type for export operations
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Export failed: {0}")]
    Encode(#[from] EncodeError),
    #[error("Export failed: {0}")]
    Output(#[from] OutputError),
}

/// The encoding collaborator.
///
/// `add_frame` is called once per animation frame, in order. `repeat` is
/// `Some` on the first call only. `finish` is called exactly once after the
/// last frame and returns the complete byte stream.
pub trait FrameEncoder {
    fn add_frame(
        &mut self,
        rgba: &[u8],
        width: u32,
        height: u32,
        delay_ms: u32,
        repeat: Option<Repeat>,
    ) -> Result<(), EncodeError>;

    fn finish(&mut self) -> Result<Vec<u8>, EncodeError>;
}

/// Check that an RGBA buffer matches its stated dimensions.
pub fn check_dimensions(rgba: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    let expected = width as usize * height as usize * 4;
    if rgba.len() != expected {
        return Err(EncodeError::Dimensions { width, height, expected, actual: rgba.len() });
    }
    Ok(())
}

/// Encode the whole animation and return the finished byte stream.
///
/// Frames are composited in parallel; encoder calls are always sequential
/// and in frame order. The animation is not modified.
pub fn export_animation<E: FrameEncoder>(
    animation: &Animation,
    encoder: &mut E,
) -> Result<Vec<u8>, ExportError> {
    info!(
        frames = animation.frame_count(),
        loop_playback = animation.loop_playback,
        "Exporting animation"
    );

    let composites: Vec<_> = animation
        .frames()
        .par_iter()
        .map(|frame| (composite_frame(frame), frame.duration()))
        .collect();

    let repeat = Repeat::from_loop(animation.loop_playback);
    for (index, (grid, delay_ms)) in composites.iter().enumerate() {
        debug!(frame = index, delay_ms, "Encoding frame");
        let first = if index == 0 { Some(repeat) } else { None };
        encoder
            .add_frame(&grid.to_rgba_bytes(), grid.width(), grid.height(), *delay_ms, first)
            .map_err(|e| {
                error!(frame = index, "Encode failed: {e}");
                e
            })?;
    }

    let bytes = encoder.finish().map_err(|e| {
        error!("Encoder finalize failed: {e}");
        e
    })?;
    info!(bytes = bytes.len(), "Export complete");
    Ok(bytes)
}

/// Encode the animation and write it to a timestamped file in `dir`.
///
/// Nothing is written unless encoding succeeds.
pub fn export_to_dir<E: FrameEncoder>(
    animation: &Animation,
    encoder: &mut E,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let bytes = export_animation(animation, encoder)?;
    let path = dir.join(export_file_name(SystemTime::now()));
    write_export(&bytes, &path)?;
    info!(path = %path.display(), "Wrote export");
    Ok(path)
}
