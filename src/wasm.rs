//! WASM API module for the browser editor
//!
//! [`WasmStudio`] wraps a [`Studio`] for JavaScript. State goes in and out
//! as the persisted JSON record, so the page keeps using local storage under
//! the same key. Edit methods return `undefined` on success or a warning
//! string when the edit was rejected.

use std::time::{Duration, UNIX_EPOCH};

use wasm_bindgen::prelude::*;

use crate::color::Color;
use crate::composition::composite_frame;
use crate::export::export_animation;
use crate::gif::GifFrameEncoder;
use crate::id::LayerId;
use crate::models::{LayerMove, ShiftDirection, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::output::export_file_name;
use crate::patterns::Pattern;
use crate::storage::{self, STORAGE_KEY};
use crate::studio::{Action, Outcome, Studio, Tool};

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Local storage key for the session record
#[wasm_bindgen]
pub fn storage_key() -> String {
    STORAGE_KEY.to_string()
}

/// Export file name for a timestamp given in milliseconds since the epoch
/// (`Date.now()`).
#[wasm_bindgen]
pub fn export_file_name_at(unix_ms: f64) -> String {
    let ms = if unix_ms.is_finite() && unix_ms > 0.0 { unix_ms as u64 } else { 0 };
    export_file_name(UNIX_EPOCH + Duration::from_millis(ms))
}

fn warning(outcome: Outcome) -> Option<String> {
    match outcome {
        Outcome::Warning(message) => Some(message),
        Outcome::Changed | Outcome::Unchanged => None,
    }
}

/// Editor session handle
#[wasm_bindgen]
pub struct WasmStudio {
    studio: Studio,
}

#[wasm_bindgen]
impl WasmStudio {
    /// A fresh project
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmStudio {
        WasmStudio { studio: Studio::new() }
    }

    /// Restore from a stored record. Unreadable records start a fresh
    /// project, as a failed local storage read does.
    pub fn from_json(json: &str) -> WasmStudio {
        let studio = storage::from_json(json).unwrap_or_else(|e| {
            tracing::error!("Failed to load state, starting fresh: {e}");
            Studio::new()
        });
        WasmStudio { studio }
    }

    /// The record to store under [`storage_key`]
    pub fn to_json(&self) -> Result<String, JsValue> {
        storage::to_json(&self.studio).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        CANVAS_WIDTH
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        CANVAS_HEIGHT
    }

    /// RGBA pixels (4 bytes per pixel) of the current frame's composite
    pub fn composite(&self) -> Vec<u8> {
        self.studio.composite().to_rgba_bytes()
    }

    /// RGBA pixels of any frame's composite; empty if out of range
    pub fn frame_composite(&self, index: usize) -> Vec<u8> {
        self.studio
            .animation()
            .frame(index)
            .map(|frame| composite_frame(frame).to_rgba_bytes())
            .unwrap_or_default()
    }

    /// Encode the animation as GIF bytes
    pub fn export_gif(&self) -> Result<Vec<u8>, JsValue> {
        let mut encoder = GifFrameEncoder::new();
        export_animation(self.studio.animation(), &mut encoder)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn frame_count(&self) -> usize {
        self.studio.animation().frame_count()
    }

    #[wasm_bindgen(getter)]
    pub fn current_frame(&self) -> usize {
        self.studio.animation().current_index()
    }

    #[wasm_bindgen(getter)]
    pub fn active_layer(&self) -> String {
        self.studio.active_layer_id().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn selected_color(&self) -> String {
        self.studio.selected_color.to_hex()
    }

    #[wasm_bindgen(getter)]
    pub fn selected_tool(&self) -> String {
        self.studio.selected_tool.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn show_grid(&self) -> bool {
        self.studio.show_grid
    }

    #[wasm_bindgen(getter)]
    pub fn loop_playback(&self) -> bool {
        self.studio.animation().loop_playback
    }

    pub fn draw(&mut self, x: i32, y: i32) -> Option<String> {
        warning(self.studio.apply(Action::Draw { x, y }))
    }

    pub fn erase(&mut self, x: i32, y: i32) -> Option<String> {
        warning(self.studio.apply(Action::Erase { x, y }))
    }

    pub fn fill(&mut self, x: i32, y: i32) -> Option<String> {
        warning(self.studio.apply(Action::Fill { x, y }))
    }

    /// Apply the selected tool at a canvas pixel
    pub fn use_tool(&mut self, x: i32, y: i32) -> Option<String> {
        warning(self.studio.apply(Action::UseTool { x, y }))
    }

    /// Set the drawing color from `#rrggbb`; malformed input selects black
    pub fn set_color(&mut self, hex: &str) -> Option<String> {
        warning(self.studio.apply(Action::SetColor(Color::from_hex(hex))))
    }

    pub fn set_tool(&mut self, name: &str) -> Option<String> {
        let tool = match name {
            "draw" => Tool::Draw,
            "erase" => Tool::Erase,
            "fill" => Tool::Fill,
            other => return Some(format!("Unknown tool '{other}'")),
        };
        warning(self.studio.apply(Action::SetTool(tool)))
    }

    pub fn toggle_grid(&mut self) -> Option<String> {
        warning(self.studio.apply(Action::ToggleGrid))
    }

    pub fn set_loop(&mut self, enabled: bool) -> Option<String> {
        warning(self.studio.apply(Action::SetLoop(enabled)))
    }

    /// Stamp `heart` or `text` onto the active layer
    pub fn stamp(&mut self, name: &str) -> Option<String> {
        let pattern = match name {
            "heart" => Pattern::Heart,
            "text" => Pattern::Text,
            other => return Some(format!("Unknown pattern '{other}'")),
        };
        warning(self.studio.apply(Action::Stamp(pattern)))
    }

    pub fn new_project(&mut self) -> Option<String> {
        warning(self.studio.apply(Action::NewProject))
    }

    pub fn add_layer(&mut self) -> Option<String> {
        warning(self.studio.apply(Action::AddLayer))
    }

    pub fn delete_layer(&mut self, id: &str) -> Option<String> {
        warning(self.studio.apply(Action::DeleteLayer(LayerId::from(id))))
    }

    pub fn duplicate_layer(&mut self, id: &str) -> Option<String> {
        warning(self.studio.apply(Action::DuplicateLayer(LayerId::from(id))))
    }

    pub fn toggle_visibility(&mut self, id: &str) -> Option<String> {
        warning(self.studio.apply(Action::ToggleVisibility(LayerId::from(id))))
    }

    /// Shift a layer by `amount` cells; `direction` is up, down, left or right
    pub fn shift_layer(&mut self, id: &str, direction: &str, amount: i32) -> Option<String> {
        let direction: ShiftDirection = match direction.parse() {
            Ok(direction) => direction,
            Err(e) => return Some(e),
        };
        warning(self.studio.apply(Action::ShiftLayer { id: LayerId::from(id), direction, amount }))
    }

    pub fn reset_offset(&mut self, id: &str) -> Option<String> {
        warning(self.studio.apply(Action::ResetOffset(LayerId::from(id))))
    }

    pub fn raise_layer(&mut self, id: &str) -> Option<String> {
        warning(self.studio.apply(Action::MoveLayer { id: LayerId::from(id), step: LayerMove::Raise }))
    }

    pub fn lower_layer(&mut self, id: &str) -> Option<String> {
        warning(self.studio.apply(Action::MoveLayer { id: LayerId::from(id), step: LayerMove::Lower }))
    }

    pub fn rename_layer(&mut self, id: &str, name: &str) -> Option<String> {
        warning(self.studio.apply(Action::RenameLayer { id: LayerId::from(id), name: name.to_string() }))
    }

    pub fn select_layer(&mut self, id: &str) -> Option<String> {
        warning(self.studio.apply(Action::SelectLayer(LayerId::from(id))))
    }

    pub fn add_frame(&mut self) -> Option<String> {
        warning(self.studio.apply(Action::AddFrame))
    }

    pub fn delete_frame(&mut self, index: usize) -> Option<String> {
        warning(self.studio.apply(Action::DeleteFrame(index)))
    }

    pub fn duplicate_frame(&mut self) -> Option<String> {
        warning(self.studio.apply(Action::DuplicateFrame))
    }

    pub fn clear_frame(&mut self) -> Option<String> {
        warning(self.studio.apply(Action::ClearFrame))
    }

    pub fn select_frame(&mut self, index: usize) -> Option<String> {
        warning(self.studio.apply(Action::SelectFrame(index)))
    }

    pub fn set_duration(&mut self, ms: u32) -> Option<String> {
        warning(self.studio.apply(Action::SetDuration(ms)))
    }
}

impl Default for WasmStudio {
    fn default() -> Self {
        Self::new()
    }
}
