//! Identifiers for layers and frames
//!
//! Identifiers look like `layer_01j9x3k2m4c8v6q0h5t7w2n4re`: a type prefix
//! followed by 26 Crockford base32 characters encoding a 48-bit millisecond
//! timestamp and 80 random bits. They sort roughly by creation time and are
//! stored verbatim, so they survive a save/load cycle unchanged.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

const ALPHABET: &[u8; 32] = b"0123456789abcdefghjkmnpqrstvwxyz";
const ENCODED_LEN: usize = 26;

/// Fallback entropy when the OS source is unavailable.
static SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Identity of a [`Layer`](crate::models::Layer).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(String);

/// Identity of a [`Frame`](crate::models::Frame).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameId(String);

impl LayerId {
    pub const PREFIX: &'static str = "layer";

    /// Mint a fresh, unique layer id.
    pub fn new() -> Self {
        Self(mint(Self::PREFIX))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FrameId {
    pub const PREFIX: &'static str = "frame";

    /// Mint a fresh, unique frame id.
    pub fn new() -> Self {
        Self(mint(Self::PREFIX))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for FrameId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for LayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<&str> for FrameId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

// The standard clock panics on wasm32-unknown-unknown; ids there rely on
// the random bits alone.
#[cfg(target_arch = "wasm32")]
fn now_millis() -> u64 {
    0
}

fn mint(prefix: &str) -> String {
    let millis = now_millis() & 0xFFFF_FFFF_FFFF;

    let mut random = [0u8; 10];
    if getrandom::fill(&mut random).is_err() {
        let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        random[2..].copy_from_slice(&seq.to_be_bytes());
    }

    let mut value = (millis as u128) << 80;
    for (i, byte) in random.iter().enumerate() {
        value |= (*byte as u128) << (8 * (9 - i));
    }

    format!("{}_{}", prefix, encode_base32(value))
}

/// Crockford base32, most significant digit first.
fn encode_base32(mut value: u128) -> String {
    let mut out = [b'0'; ENCODED_LEN];
    for slot in out.iter_mut().rev() {
        *slot = ALPHABET[(value & 0x1F) as usize];
        value >>= 5;
    }
    out.iter().map(|&b| b as char).collect()
}
