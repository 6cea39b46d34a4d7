//! lightmoji - layered pixel-art animation editor core
//!
//! This library provides:
//! - A 60x26 pixel canvas with layered frames and a frame timeline
//! - Layer compositing with non-destructive offsets
//! - Structural editing through an editor session ([`studio::Studio`])
//! - GIF export through a pluggable [`export::FrameEncoder`]
//! - A persisted JSON record with migration of older shapes

pub mod cli;
pub mod color;
pub mod composition;
pub mod config;
pub mod emoji;
pub mod export;
pub mod gif;
pub mod id;
pub mod logging;
pub mod models;
pub mod output;
pub mod patterns;
pub mod storage;
pub mod studio;

#[cfg(feature = "wasm")]
pub mod wasm;
