//! Editor session
//!
//! [`Studio`] wraps the [`Animation`] document together with editor-only
//! state (active layer, drawing color, tool, grid overlay). User actions
//! enter through [`Studio::apply`], which never fails: every action ends in
//! either a state change or a warning, and a rejected action leaves the
//! session untouched.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::color::Color;
use crate::composition::composite_frame;
use crate::id::LayerId;
use crate::models::{Animation, EditError, Frame, Layer, LayerMove, PixelGrid, ShiftDirection};
use crate::patterns::{self, Pattern};

/// Drawing tool applied by [`Action::UseTool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Draw,
    Erase,
    Fill,
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Tool::Draw => "draw",
            Tool::Erase => "erase",
            Tool::Fill => "fill",
        };
        f.write_str(s)
    }
}

/// A user action on the session.
///
/// Layer actions target the current frame. Pixel coordinates are canvas
/// coordinates; they are mapped through the active layer's offset so the
/// edit lands where the pixel is displayed.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddLayer,
    DeleteLayer(LayerId),
    DuplicateLayer(LayerId),
    ToggleVisibility(LayerId),
    ShiftLayer { id: LayerId, direction: ShiftDirection, amount: i32 },
    ResetOffset(LayerId),
    MoveLayer { id: LayerId, step: LayerMove },
    RenameLayer { id: LayerId, name: String },
    SelectLayer(LayerId),
    AddFrame,
    DeleteFrame(usize),
    DuplicateFrame,
    ClearFrame,
    SelectFrame(usize),
    SetDuration(u32),
    Draw { x: i32, y: i32 },
    Erase { x: i32, y: i32 },
    Fill { x: i32, y: i32 },
    UseTool { x: i32, y: i32 },
    Stamp(Pattern),
    SetColor(Color),
    SetTool(Tool),
    ToggleGrid,
    SetLoop(bool),
    NewProject,
}

/// Result of applying an [`Action`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The session changed
    Changed,
    /// Valid action with nothing to do (e.g. painting off-canvas)
    Unchanged,
    /// The action was rejected; the message is meant for the user
    Warning(String),
}

impl Outcome {
    pub fn is_warning(&self) -> bool {
        matches!(self, Outcome::Warning(_))
    }
}

/// The editor session.
#[derive(Debug, Clone, PartialEq)]
pub struct Studio {
    animation: Animation,
    active_layer: LayerId,
    pub selected_color: Color,
    pub selected_tool: Tool,
    pub show_grid: bool,
}

impl Studio {
    /// A fresh project: one empty frame, purple brush, draw tool, grid on.
    pub fn new() -> Self {
        Self::from_animation(Animation::new())
    }

    /// Start a session on an existing animation with default preferences.
    /// The bottom layer of the current frame becomes active.
    pub fn from_animation(animation: Animation) -> Self {
        let active_layer = animation.current_frame().first_layer().id.clone();
        Self {
            animation,
            active_layer,
            selected_color: Color::PURPLE,
            selected_tool: Tool::Draw,
            show_grid: true,
        }
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    pub fn current_frame(&self) -> &Frame {
        self.animation.current_frame()
    }

    pub fn active_layer_id(&self) -> &LayerId {
        &self.active_layer
    }

    pub fn active_layer(&self) -> &Layer {
        let frame = self.animation.current_frame();
        frame.layer(&self.active_layer).unwrap_or_else(|| frame.first_layer())
    }

    /// Composite of the current frame, for display.
    pub fn composite(&self) -> PixelGrid {
        composite_frame(self.animation.current_frame())
    }

    /// Apply a user action. Rejections become [`Outcome::Warning`] and leave
    /// the session unchanged.
    pub fn apply(&mut self, action: Action) -> Outcome {
        debug!(?action, "Applying action");
        match self.try_apply(action) {
            Ok(true) => Outcome::Changed,
            Ok(false) => Outcome::Unchanged,
            Err(e) => {
                warn!("Rejected edit: {e}");
                Outcome::Warning(e.to_string())
            }
        }
    }

    fn try_apply(&mut self, action: Action) -> Result<bool, EditError> {
        match action {
            Action::AddLayer => {
                self.add_layer();
            }
            Action::DeleteLayer(id) => self.delete_layer(&id)?,
            Action::DuplicateLayer(id) => {
                self.duplicate_layer(&id)?;
            }
            Action::ToggleVisibility(id) => {
                self.animation.current_frame_mut().toggle_visibility(&id)?;
            }
            Action::ShiftLayer { id, direction, amount } => {
                self.animation.current_frame_mut().shift_layer(&id, direction, amount)?;
            }
            Action::ResetOffset(id) => self.animation.current_frame_mut().reset_layer_offset(&id)?,
            Action::MoveLayer { id, step } => {
                self.animation.current_frame_mut().move_layer(&id, step)?;
            }
            Action::RenameLayer { id, name } => {
                self.animation.current_frame_mut().rename_layer(&id, name)?;
            }
            Action::SelectLayer(id) => self.select_layer(&id)?,
            Action::AddFrame => self.add_frame(),
            Action::DeleteFrame(index) => self.delete_frame(index)?,
            Action::DuplicateFrame => self.duplicate_frame(),
            Action::ClearFrame => {
                let index = self.animation.current_index();
                self.animation.clear_frame(index)?;
            }
            Action::SelectFrame(index) => self.select_frame(index)?,
            Action::SetDuration(ms) => self.animation.current_frame_mut().set_duration(ms)?,
            Action::Draw { x, y } => return Ok(self.paint(x, y, self.selected_color)),
            Action::Erase { x, y } => return Ok(self.paint(x, y, Color::EMPTY)),
            Action::Fill { x, y } => return Ok(self.fill(x, y, self.selected_color)),
            Action::UseTool { x, y } => {
                return Ok(match self.selected_tool {
                    Tool::Draw => self.paint(x, y, self.selected_color),
                    Tool::Erase => self.paint(x, y, Color::EMPTY),
                    Tool::Fill => self.fill(x, y, self.selected_color),
                });
            }
            Action::Stamp(pattern) => return Ok(self.stamp(&pattern)),
            Action::SetColor(color) => self.selected_color = color,
            Action::SetTool(tool) => self.selected_tool = tool,
            Action::ToggleGrid => self.show_grid = !self.show_grid,
            Action::SetLoop(looping) => self.animation.loop_playback = looping,
            Action::NewProject => *self = Studio::new(),
        }
        Ok(true)
    }

    /// Append a layer to the current frame and make it active.
    pub fn add_layer(&mut self) -> LayerId {
        let id = self.animation.current_frame_mut().add_layer();
        self.active_layer = id.clone();
        id
    }

    /// Delete a layer from the current frame. If it was active, the new
    /// bottom layer becomes active.
    pub fn delete_layer(&mut self, id: &LayerId) -> Result<(), EditError> {
        let frame = self.animation.current_frame_mut();
        frame.delete_layer(id)?;
        if &self.active_layer == id {
            self.active_layer = frame.first_layer().id.clone();
        }
        Ok(())
    }

    /// Duplicate a layer of the current frame; the copy becomes active.
    pub fn duplicate_layer(&mut self, id: &LayerId) -> Result<LayerId, EditError> {
        let copy = self.animation.current_frame_mut().duplicate_layer(id)?;
        self.active_layer = copy.clone();
        Ok(copy)
    }

    pub fn select_layer(&mut self, id: &LayerId) -> Result<(), EditError> {
        if self.animation.current_frame().position(id).is_none() {
            return Err(EditError::LayerNotFound(id.clone()));
        }
        self.active_layer = id.clone();
        Ok(())
    }

    /// Append a frame and switch to it.
    pub fn add_frame(&mut self) {
        self.animation.add_frame();
        self.sync_active_layer(0);
    }

    pub fn delete_frame(&mut self, index: usize) -> Result<(), EditError> {
        let slot = self.active_slot();
        self.animation.delete_frame(index)?;
        self.sync_active_layer(slot);
        Ok(())
    }

    /// Duplicate the current frame and switch to the copy, keeping the same
    /// layer slot active.
    pub fn duplicate_frame(&mut self) {
        let slot = self.active_slot();
        let index = self.animation.current_index();
        // The current index is always in range
        if self.animation.duplicate_frame(index).is_ok() {
            self.sync_active_layer(slot);
        }
    }

    pub fn select_frame(&mut self, index: usize) -> Result<(), EditError> {
        let slot = self.active_slot();
        self.animation.select_frame(index)?;
        self.sync_active_layer(slot);
        Ok(())
    }

    /// Stack position of the active layer in the current frame.
    fn active_slot(&self) -> usize {
        self.animation.current_frame().position(&self.active_layer).unwrap_or(0)
    }

    /// Point the active layer at `slot` in the current frame, or at the bottom
    /// layer if the frame has fewer layers.
    fn sync_active_layer(&mut self, slot: usize) {
        let frame = self.animation.current_frame();
        let layer = frame.layers().get(slot).unwrap_or_else(|| frame.first_layer());
        self.active_layer = layer.id.clone();
    }

    fn active_layer_mut(&mut self) -> &mut Layer {
        let id = self.active_layer.clone();
        let frame = self.animation.current_frame_mut();
        let index = frame.position(&id).unwrap_or(0);
        &mut frame.layers_mut()[index]
    }

    /// Map a canvas coordinate into the active layer's grid.
    fn to_layer_coords(&self, x: i32, y: i32) -> Option<(u32, u32)> {
        let layer = self.active_layer();
        let lx = x as i64 - layer.offset_x as i64;
        let ly = y as i64 - layer.offset_y as i64;
        if layer.canvas().contains(lx, ly) {
            Some((lx as u32, ly as u32))
        } else {
            None
        }
    }

    fn paint(&mut self, x: i32, y: i32, color: Color) -> bool {
        let canvas = self.active_layer().canvas();
        if !canvas.contains(x as i64, y as i64) {
            return false;
        }
        match self.to_layer_coords(x, y) {
            Some((lx, ly)) => {
                let pixels = &mut self.active_layer_mut().pixels;
                let changed = pixels.get(lx, ly) != Some(color);
                pixels.set(lx, ly, color);
                changed
            }
            None => false,
        }
    }

    fn fill(&mut self, x: i32, y: i32, color: Color) -> bool {
        let canvas = self.active_layer().canvas();
        if !canvas.contains(x as i64, y as i64) {
            return false;
        }
        match self.to_layer_coords(x, y) {
            Some((lx, ly)) => self.active_layer_mut().pixels.flood_fill(lx, ly, color) > 0,
            None => false,
        }
    }

    /// Paint a built-in pattern onto the active layer in the selected color.
    fn stamp(&mut self, pattern: &Pattern) -> bool {
        let canvas = self.active_layer().canvas();
        let stamp = patterns::render(pattern, canvas, self.selected_color);
        let pixels = &mut self.active_layer_mut().pixels;
        let mut changed = false;
        for (x, y, color) in stamp.painted() {
            changed |= pixels.get(x, y) != Some(color);
            pixels.set(x, y, color);
        }
        changed
    }

    /// Replace the whole session state (used when loading a stored record).
    pub(crate) fn restore(
        animation: Animation,
        selected_color: Color,
        selected_tool: Tool,
        show_grid: bool,
    ) -> Self {
        Self { selected_color, selected_tool, show_grid, ..Self::from_animation(animation) }
    }
}

impl Default for Studio {
    fn default() -> Self {
        Self::new()
    }
}
