//! Frames: one ordered layer stack plus a display duration.

use crate::id::{FrameId, LayerId};

use super::error::EditError;
use super::layer::{Layer, ShiftDirection};

/// Reordering step for [`Frame::move_layer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerMove {
    /// Toward the top of the stack (drawn later)
    Raise,
    /// Toward the bottom of the stack (drawn earlier)
    Lower,
}

/// One tick of the animation.
///
/// Layers are ordered bottom to top: index 0 is drawn first. A frame always
/// holds at least one layer; the only way to change the count is through
/// the methods here, which enforce that.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub id: FrameId,
    layers: Vec<Layer>,
    duration: u32,
}

impl Frame {
    /// Display duration of a new frame, in milliseconds.
    pub const DEFAULT_DURATION: u32 = 200;

    /// A frame with a single empty "Background" layer and the default duration.
    pub fn new() -> Self {
        Self {
            id: FrameId::new(),
            layers: vec![Layer::new(Layer::BACKGROUND)],
            duration: Self::DEFAULT_DURATION,
        }
    }

    /// Assemble a frame from existing parts.
    ///
    /// Returns `None` if `layers` is empty. A zero duration is raised to 1ms.
    pub fn from_parts(id: FrameId, layers: Vec<Layer>, duration: u32) -> Option<Self> {
        if layers.is_empty() {
            return None;
        }
        Some(Self { id, layers, duration: duration.max(1) })
    }

    /// Layers bottom to top.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Mutable access to the layers. The slice cannot grow or shrink.
    pub fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Index of the layer with `id`.
    pub fn position(&self, id: &LayerId) -> Option<usize> {
        self.layers.iter().position(|l| &l.id == id)
    }

    pub fn layer(&self, id: &LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| &l.id == id)
    }

    pub fn layer_mut(&mut self, id: &LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| &l.id == id)
    }

    fn require(&mut self, id: &LayerId) -> Result<&mut Layer, EditError> {
        self.layer_mut(id).ok_or_else(|| EditError::LayerNotFound(id.clone()))
    }

    /// The bottom layer.
    pub fn first_layer(&self) -> &Layer {
        &self.layers[0]
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn set_duration(&mut self, ms: u32) -> Result<(), EditError> {
        if ms == 0 {
            return Err(EditError::ZeroDuration);
        }
        self.duration = ms;
        Ok(())
    }

    /// Append a new empty layer named "Layer N" on top of the stack.
    pub fn add_layer(&mut self) -> LayerId {
        let layer = Layer::new(format!("Layer {}", self.layers.len() + 1));
        let id = layer.id.clone();
        self.layers.push(layer);
        id
    }

    /// Remove a layer. Rejected if it is the only one.
    pub fn delete_layer(&mut self, id: &LayerId) -> Result<Layer, EditError> {
        let index = self.position(id).ok_or_else(|| EditError::LayerNotFound(id.clone()))?;
        if self.layers.len() == 1 {
            return Err(EditError::LastLayer);
        }
        Ok(self.layers.remove(index))
    }

    /// Deep-copy a layer and insert the copy directly above it.
    pub fn duplicate_layer(&mut self, id: &LayerId) -> Result<LayerId, EditError> {
        let index = self.position(id).ok_or_else(|| EditError::LayerNotFound(id.clone()))?;
        let copy = self.layers[index].duplicate();
        let copy_id = copy.id.clone();
        self.layers.insert(index + 1, copy);
        Ok(copy_id)
    }

    /// Flip a layer's visibility. Returns the new visibility.
    pub fn toggle_visibility(&mut self, id: &LayerId) -> Result<bool, EditError> {
        let layer = self.require(id)?;
        layer.toggle_visibility();
        Ok(layer.visible)
    }

    /// Shift a layer's projection. Returns the new offset.
    pub fn shift_layer(
        &mut self,
        id: &LayerId,
        direction: ShiftDirection,
        amount: i32,
    ) -> Result<(i32, i32), EditError> {
        let layer = self.require(id)?;
        layer.shift(direction, amount);
        Ok(layer.offset())
    }

    pub fn reset_layer_offset(&mut self, id: &LayerId) -> Result<(), EditError> {
        self.require(id)?.reset_offset();
        Ok(())
    }

    pub fn set_layer_offset(&mut self, id: &LayerId, x: i32, y: i32) -> Result<(), EditError> {
        self.require(id)?.set_offset(x, y);
        Ok(())
    }

    pub fn rename_layer(&mut self, id: &LayerId, name: impl Into<String>) -> Result<(), EditError> {
        self.require(id)?.name = name.into();
        Ok(())
    }

    /// Swap a layer with its neighbour. Returns the layer's new index; at
    /// the top or bottom of the stack nothing moves.
    pub fn move_layer(&mut self, id: &LayerId, step: LayerMove) -> Result<usize, EditError> {
        let index = self.position(id).ok_or_else(|| EditError::LayerNotFound(id.clone()))?;
        let target = match step {
            LayerMove::Raise if index + 1 < self.layers.len() => index + 1,
            LayerMove::Lower if index > 0 => index - 1,
            _ => return Ok(index),
        };
        self.layers.swap(index, target);
        Ok(target)
    }

    /// Empty every layer's pixels, keeping ids, names, visibility, offsets
    /// and order.
    pub fn clear(&mut self) {
        for layer in &mut self.layers {
            layer.clear();
        }
    }

    /// Deep copy with a fresh frame id. Every layer is duplicated the same way
    /// [`Frame::duplicate_layer`] does it, so copies get fresh ids and names.
    pub fn duplicate(&self) -> Self {
        Self {
            id: FrameId::new(),
            layers: self.layers.iter().map(Layer::duplicate).collect(),
            duration: self.duration,
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}
