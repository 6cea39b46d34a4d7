//! Layers: positioned, visibility-toggleable pixel grids.

use std::fmt;
use std::str::FromStr;

use crate::id::LayerId;

use super::grid::{Canvas, PixelGrid};

/// Direction for a non-destructive layer shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ShiftDirection {
    Up,
    Down,
    Left,
    Right,
}

impl ShiftDirection {
    /// Offset delta `(dx, dy)` for one step in this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            ShiftDirection::Up => (0, -1),
            ShiftDirection::Down => (0, 1),
            ShiftDirection::Left => (-1, 0),
            ShiftDirection::Right => (1, 0),
        }
    }

    /// The direction that undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            ShiftDirection::Up => ShiftDirection::Down,
            ShiftDirection::Down => ShiftDirection::Up,
            ShiftDirection::Left => ShiftDirection::Right,
            ShiftDirection::Right => ShiftDirection::Left,
        }
    }
}

impl FromStr for ShiftDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(ShiftDirection::Up),
            "down" => Ok(ShiftDirection::Down),
            "left" => Ok(ShiftDirection::Left),
            "right" => Ok(ShiftDirection::Right),
            other => Err(format!("unknown shift direction '{}'", other)),
        }
    }
}

impl fmt::Display for ShiftDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ShiftDirection::Up => "up",
            ShiftDirection::Down => "down",
            ShiftDirection::Left => "left",
            ShiftDirection::Right => "right",
        };
        f.write_str(s)
    }
}

/// A named pixel grid with a projection offset.
///
/// The grid always covers the full canvas. `offset_x`/`offset_y` only move
/// where the grid lands when composited; they never touch stored pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    pub visible: bool,
    pub pixels: PixelGrid,
    pub offset_x: i32,
    pub offset_y: i32,
    /// Stored and persisted, but not used by the compositor: visible pixels
    /// are always drawn fully opaque.
    pub opacity: f32,
}

impl Layer {
    /// Default name of the bottom layer of a new frame.
    pub const BACKGROUND: &'static str = "Background";
    /// Suffix appended to the name of a duplicated layer.
    pub const COPY_SUFFIX: &'static str = " Copy";

    /// A visible, fully empty layer at zero offset with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_pixels(name, PixelGrid::default())
    }

    /// A visible layer at zero offset holding `pixels`, with a fresh id.
    pub fn with_pixels(name: impl Into<String>, pixels: PixelGrid) -> Self {
        Self {
            id: LayerId::new(),
            name: name.into(),
            visible: true,
            pixels,
            offset_x: 0,
            offset_y: 0,
            opacity: 1.0,
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.pixels.canvas()
    }

    /// Deep copy with a fresh id and a derived name.
    pub fn duplicate(&self) -> Self {
        Self {
            id: LayerId::new(),
            name: format!("{}{}", self.name, Self::COPY_SUFFIX),
            visible: self.visible,
            pixels: self.pixels.clone(),
            offset_x: self.offset_x,
            offset_y: self.offset_y,
            opacity: self.opacity,
        }
    }

    pub fn toggle_visibility(&mut self) {
        self.visible = !self.visible;
    }

    /// Move the projection `amount` steps in `direction`.
    ///
    /// A negative amount moves the opposite way. Saturates at the `i32`
    /// limits instead of wrapping.
    pub fn shift(&mut self, direction: ShiftDirection, amount: i32) {
        let (dx, dy) = direction.delta();
        self.offset_x = self.offset_x.saturating_add(dx.saturating_mul(amount));
        self.offset_y = self.offset_y.saturating_add(dy.saturating_mul(amount));
    }

    pub fn set_offset(&mut self, x: i32, y: i32) {
        self.offset_x = x;
        self.offset_y = y;
    }

    pub fn reset_offset(&mut self) {
        self.set_offset(0, 0);
    }

    pub fn offset(&self) -> (i32, i32) {
        (self.offset_x, self.offset_y)
    }

    /// Empty every cell, keeping everything else.
    pub fn clear(&mut self) {
        self.pixels.clear();
    }
}
