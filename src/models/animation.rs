//! The animation document: an ordered, non-empty list of frames.

use super::error::EditError;
use super::frame::Frame;

/// Ordered frames plus the current-frame cursor and the loop setting.
///
/// There is always at least one frame and `current_frame` always points at
/// one of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    frames: Vec<Frame>,
    current_frame: usize,
    /// Loop forever on playback and export; otherwise play once.
    pub loop_playback: bool,
}

impl Animation {
    /// A single empty frame, looping.
    pub fn new() -> Self {
        Self { frames: vec![Frame::new()], current_frame: 0, loop_playback: true }
    }

    /// Assemble from stored parts. An out-of-range cursor is clamped to the
    /// last frame. Returns `None` when `frames` is empty.
    pub fn from_parts(frames: Vec<Frame>, current_frame: usize, loop_playback: bool) -> Option<Self> {
        if frames.is_empty() {
            return None;
        }
        let current_frame = current_frame.min(frames.len() - 1);
        Some(Self { frames, current_frame, loop_playback })
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn frame_mut(&mut self, index: usize) -> Result<&mut Frame, EditError> {
        let count = self.frames.len();
        self.frames.get_mut(index).ok_or(EditError::FrameOutOfRange { index, count })
    }

    pub fn current_index(&self) -> usize {
        self.current_frame
    }

    pub fn current_frame(&self) -> &Frame {
        &self.frames[self.current_frame]
    }

    pub fn current_frame_mut(&mut self) -> &mut Frame {
        &mut self.frames[self.current_frame]
    }

    /// Total playback time of one pass, in milliseconds.
    pub fn total_duration(&self) -> u64 {
        self.frames.iter().map(|f| f.duration() as u64).sum()
    }

    pub fn select_frame(&mut self, index: usize) -> Result<(), EditError> {
        self.check_index(index)?;
        self.current_frame = index;
        Ok(())
    }

    /// Append a fresh frame and make it current. Returns its index.
    pub fn add_frame(&mut self) -> usize {
        self.frames.push(Frame::new());
        self.current_frame = self.frames.len() - 1;
        self.current_frame
    }

    /// Remove the frame at `index`. Rejected if it is the only frame.
    ///
    /// The cursor keeps its position and is clamped to the new last frame if
    /// it fell off the end.
    pub fn delete_frame(&mut self, index: usize) -> Result<Frame, EditError> {
        self.check_index(index)?;
        if self.frames.len() == 1 {
            return Err(EditError::LastFrame);
        }
        let removed = self.frames.remove(index);
        if self.current_frame >= self.frames.len() {
            self.current_frame = self.frames.len() - 1;
        }
        Ok(removed)
    }

    /// Deep-copy the frame at `index`, insert the copy right after it and
    /// make the copy current. Returns the copy's index.
    pub fn duplicate_frame(&mut self, index: usize) -> Result<usize, EditError> {
        self.check_index(index)?;
        let copy = self.frames[index].duplicate();
        self.frames.insert(index + 1, copy);
        self.current_frame = index + 1;
        Ok(self.current_frame)
    }

    /// Empty every layer of the frame at `index`.
    pub fn clear_frame(&mut self, index: usize) -> Result<(), EditError> {
        self.frame_mut(index)?.clear();
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), EditError> {
        if index < self.frames.len() {
            Ok(())
        } else {
            Err(EditError::FrameOutOfRange { index, count: self.frames.len() })
        }
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn test_new_animation() {
        let anim = Animation::new();
        assert_eq!(anim.frame_count(), 1);
        assert_eq!(anim.current_index(), 0);
        assert!(anim.loop_playback);
    }

    #[test]
    fn test_from_parts_clamps_cursor() {
        let anim = Animation::from_parts(vec![Frame::new(), Frame::new()], 9, false).unwrap();
        assert_eq!(anim.current_index(), 1);
        assert!(Animation::from_parts(vec![], 0, true).is_none());
    }

    #[test]
    fn test_add_frame_becomes_current() {
        let mut anim = Animation::new();
        assert_eq!(anim.add_frame(), 1);
        assert_eq!(anim.current_index(), 1);
        assert_eq!(anim.current_frame().layer_count(), 1);
    }

    #[test]
    fn test_delete_frames_until_one_left() {
        let mut anim = Animation::new();
        for _ in 0..3 {
            anim.add_frame();
        }
        let mut deleted = 0;
        for _ in 0..4 {
            if anim.delete_frame(0).is_ok() {
                deleted += 1;
            }
        }
        assert_eq!(deleted, 3);
        assert_eq!(anim.frame_count(), 1);
        assert_eq!(anim.delete_frame(0), Err(EditError::LastFrame));
    }

    #[test]
    fn test_delete_last_current_frame_reclamps() {
        let mut anim = Animation::new();
        anim.add_frame();
        anim.add_frame();
        assert_eq!(anim.current_index(), 2);
        anim.delete_frame(2).unwrap();
        assert_eq!(anim.current_index(), 1);
    }

    #[test]
    fn test_delete_earlier_frame_keeps_cursor_in_bounds() {
        let mut anim = Animation::new();
        anim.add_frame();
        anim.select_frame(1).unwrap();
        anim.delete_frame(0).unwrap();
        assert_eq!(anim.current_index(), 0);
    }

    #[test]
    fn test_delete_out_of_range() {
        let mut anim = Animation::new();
        anim.add_frame();
        assert_eq!(anim.delete_frame(5), Err(EditError::FrameOutOfRange { index: 5, count: 2 }));
    }

    #[test]
    fn test_duplicate_frame_inserted_after_source() {
        let mut anim = Animation::new();
        anim.add_frame();
        anim.frame_mut(0).unwrap().layers_mut()[0].pixels.set(0, 0, Color::PURPLE);

        let index = anim.duplicate_frame(0).unwrap();
        assert_eq!(index, 1);
        assert_eq!(anim.current_index(), 1);
        assert_eq!(anim.frame_count(), 3);
        assert_ne!(anim.frames()[0].id, anim.frames()[1].id);
        assert_eq!(anim.frames()[1].layers()[0].pixels.get(0, 0), Some(Color::PURPLE));
    }

    #[test]
    fn test_total_duration() {
        let mut anim = Animation::new();
        anim.add_frame();
        anim.frame_mut(1).unwrap().set_duration(300).unwrap();
        assert_eq!(anim.total_duration(), 500);
    }
}
