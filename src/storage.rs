//! Persisted editor state
//!
//! The whole session is saved as one JSON record under [`STORAGE_KEY`] in a
//! [`KeyValueStore`]. Field names are camelCase so the record matches what
//! the browser editor keeps in local storage.
//!
//! Older records stored a single flat `pixels` grid per frame instead of a
//! layer list. Each frame record is classified once into one of three
//! shapes (see [`FrameShape`]) and converted accordingly.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::color::Color;
use crate::id::{FrameId, LayerId};
use crate::models::{Animation, Canvas, Frame, Layer, PixelGrid};
use crate::studio::{Studio, Tool};

/// Key the session record is stored under.
pub const STORAGE_KEY: &str = "lightmoji-studio-state";

/// Error type for storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid stored state: {0}")]
    Json(#[from] serde_json::Error),
}

/// String key-value store holding the persisted record.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// In-memory store, used by tests and the WASM binding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_opacity() -> f32 {
    1.0
}

fn default_color() -> Color {
    Color::PURPLE
}

fn default_layer_name() -> String {
    "Layer".to_string()
}

// Older records wrote `null` for unset preferences; read those as the
// field's default instead of rejecting the whole record.

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_true<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

fn null_as_purple<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
    Ok(Option::<Color>::deserialize(deserializer)?.unwrap_or_else(default_color))
}

fn null_as_layer_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_layer_name))
}

fn null_as_opaque<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
    Ok(Option::<f32>::deserialize(deserializer)?.unwrap_or_else(default_opacity))
}

/// The persisted session record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredState {
    #[serde(default, deserialize_with = "null_as_default")]
    pub frames: Vec<FrameRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_frame_index: usize,
    #[serde(default = "default_color", deserialize_with = "null_as_purple")]
    pub selected_color: Color,
    #[serde(default, deserialize_with = "null_as_default")]
    pub selected_tool: Tool,
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub show_grid: bool,
    #[serde(rename = "loop", default = "default_true", deserialize_with = "null_as_true")]
    pub loop_playback: bool,
}

/// One stored frame, in any of the shapes older versions wrote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FrameId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layers: Option<Vec<LayerRecord>>,
    /// Flat grid written before layers existed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pixels: Option<Vec<Vec<Color>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

/// How a [`FrameRecord`] is converted on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameShape {
    /// Has a non-empty layer list
    Layered,
    /// Has a flat pixel grid and no layers
    Flat,
    /// No pixel data at all
    Blank,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerRecord {
    #[serde(default)]
    pub id: Option<LayerId>,
    #[serde(default = "default_layer_name", deserialize_with = "null_as_layer_name")]
    pub name: String,
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub visible: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pixels: Vec<Vec<Color>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub offset_x: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub offset_y: i32,
    #[serde(default = "default_opacity", deserialize_with = "null_as_opaque")]
    pub opacity: f32,
}

/// Build a canvas-sized grid, logging when the stored rows had to be fixed up.
fn grid_from_rows(rows: Vec<Vec<Color>>, what: &str) -> PixelGrid {
    let (grid, normalized) = PixelGrid::from_rows(rows, Canvas::default());
    if normalized {
        warn!("Stored {what} grid had the wrong dimensions and was normalized");
    }
    grid
}

impl LayerRecord {
    fn from_layer(layer: &Layer) -> Self {
        Self {
            id: Some(layer.id.clone()),
            name: layer.name.clone(),
            visible: layer.visible,
            pixels: layer.pixels.to_rows(),
            offset_x: layer.offset_x,
            offset_y: layer.offset_y,
            opacity: layer.opacity,
        }
    }

    fn into_layer(self) -> Layer {
        Layer {
            id: self.id.unwrap_or_default(),
            pixels: grid_from_rows(self.pixels, "layer"),
            name: self.name,
            visible: self.visible,
            offset_x: self.offset_x,
            offset_y: self.offset_y,
            opacity: self.opacity,
        }
    }
}

impl FrameRecord {
    pub fn from_frame(frame: &Frame) -> Self {
        Self {
            id: Some(frame.id.clone()),
            layers: Some(frame.layers().iter().map(LayerRecord::from_layer).collect()),
            pixels: None,
            duration: Some(frame.duration()),
        }
    }

    pub fn shape(&self) -> FrameShape {
        match (&self.layers, &self.pixels) {
            (Some(layers), _) if !layers.is_empty() => FrameShape::Layered,
            (_, Some(_)) => FrameShape::Flat,
            _ => FrameShape::Blank,
        }
    }

    pub fn into_frame(self) -> Frame {
        let shape = self.shape();
        let id = self.id.unwrap_or_default();
        let duration = self.duration.unwrap_or(Frame::DEFAULT_DURATION);

        let layers = match shape {
            FrameShape::Layered => {
                self.layers.unwrap_or_default().into_iter().map(LayerRecord::into_layer).collect()
            }
            FrameShape::Flat => {
                debug!(frame = %id, "Migrating flat frame to a single layer");
                let grid = grid_from_rows(self.pixels.unwrap_or_default(), "frame");
                vec![Layer::with_pixels(Layer::BACKGROUND, grid)]
            }
            FrameShape::Blank => vec![Layer::new(Layer::BACKGROUND)],
        };

        match Frame::from_parts(id, layers, duration) {
            Some(frame) => frame,
            None => Frame::new(),
        }
    }
}

impl StoredState {
    pub fn from_studio(studio: &Studio) -> Self {
        let animation = studio.animation();
        Self {
            frames: animation.frames().iter().map(FrameRecord::from_frame).collect(),
            current_frame_index: animation.current_index(),
            selected_color: studio.selected_color,
            selected_tool: studio.selected_tool,
            show_grid: studio.show_grid,
            loop_playback: animation.loop_playback,
        }
    }

    pub fn into_studio(self) -> Studio {
        let frames: Vec<Frame> = self.frames.into_iter().map(FrameRecord::into_frame).collect();
        let animation = match Animation::from_parts(frames, self.current_frame_index, self.loop_playback) {
            Some(animation) => animation,
            None => {
                warn!("Stored state has no frames, starting a new animation");
                let mut animation = Animation::new();
                animation.loop_playback = self.loop_playback;
                animation
            }
        };
        Studio::restore(animation, self.selected_color, self.selected_tool, self.show_grid)
    }
}

pub fn to_json(studio: &Studio) -> Result<String, StorageError> {
    Ok(serde_json::to_string(&StoredState::from_studio(studio))?)
}

pub fn from_json(json: &str) -> Result<Studio, StorageError> {
    let state: StoredState = serde_json::from_str(json)?;
    Ok(state.into_studio())
}

/// Write the session under [`STORAGE_KEY`].
pub fn save<S: KeyValueStore + ?Sized>(store: &mut S, studio: &Studio) -> Result<(), StorageError> {
    let json = to_json(studio)?;
    store.set(STORAGE_KEY, &json).map_err(|e| {
        error!("Failed to save state: {e}");
        e
    })?;
    info!(frames = studio.animation().frame_count(), "Saved state");
    Ok(())
}

/// Read the stored session, if there is one.
pub fn try_load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<Studio>, StorageError> {
    match store.get(STORAGE_KEY)? {
        Some(json) => Ok(Some(from_json(&json)?)),
        None => Ok(None),
    }
}

/// Read the stored session, falling back to a fresh one when nothing is
/// stored or the record cannot be read.
pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Studio {
    match try_load(store) {
        Ok(Some(studio)) => studio,
        Ok(None) => {
            debug!("No stored state, starting fresh");
            Studio::new()
        }
        Err(e) => {
            error!("Failed to load state, starting fresh: {e}");
            Studio::new()
        }
    }
}

/// Drop the stored session.
pub fn clear<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<(), StorageError> {
    store.remove(STORAGE_KEY)
}
