//! Pre-made stamps for quick testing
//!
//! Small bitmaps (a heart, a 5x7 block font) that can be stamped onto a
//! layer. `1` cells are painted, `0` cells are left untouched.

use crate::color::Color;
use crate::models::{Canvas, PixelGrid};

/// Built-in stamp selector.
#[derive(Debug, Clone, PartialEq, Eq, clap::ValueEnum)]
pub enum Pattern {
    /// An 11x9 heart near the middle of the canvas
    Heart,
    /// The word "CLAUDIA" in the 5x7 font
    Text,
}

const HEART: [[u8; 11]; 9] = [
    [0, 0, 1, 1, 0, 0, 0, 1, 1, 0, 0],
    [0, 1, 1, 1, 1, 0, 1, 1, 1, 1, 0],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0],
    [0, 0, 1, 1, 1, 1, 1, 1, 1, 0, 0],
    [0, 0, 0, 1, 1, 1, 1, 1, 0, 0, 0],
    [0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0],
];

const HEART_ORIGIN: (u32, u32) = (25, 8);

type Glyph = [[u8; 5]; 7];

const GLYPH_ADVANCE: u32 = 6;
const TEXT_ORIGIN: (u32, u32) = (3, 9);

fn glyph(c: char) -> Option<&'static Glyph> {
    const C: Glyph = [
        [0, 1, 1, 1, 0],
        [1, 0, 0, 0, 1],
        [1, 0, 0, 0, 0],
        [1, 0, 0, 0, 0],
        [1, 0, 0, 0, 0],
        [1, 0, 0, 0, 1],
        [0, 1, 1, 1, 0],
    ];
    const L: Glyph = [
        [1, 0, 0, 0, 0],
        [1, 0, 0, 0, 0],
        [1, 0, 0, 0, 0],
        [1, 0, 0, 0, 0],
        [1, 0, 0, 0, 0],
        [1, 0, 0, 0, 0],
        [1, 1, 1, 1, 1],
    ];
    const A: Glyph = [
        [0, 1, 1, 1, 0],
        [1, 0, 0, 0, 1],
        [1, 0, 0, 0, 1],
        [1, 1, 1, 1, 1],
        [1, 0, 0, 0, 1],
        [1, 0, 0, 0, 1],
        [1, 0, 0, 0, 1],
    ];
    const U: Glyph = [
        [1, 0, 0, 0, 1],
        [1, 0, 0, 0, 1],
        [1, 0, 0, 0, 1],
        [1, 0, 0, 0, 1],
        [1, 0, 0, 0, 1],
        [1, 0, 0, 0, 1],
        [0, 1, 1, 1, 0],
    ];
    const D: Glyph = [
        [1, 1, 1, 0, 0],
        [1, 0, 0, 1, 0],
        [1, 0, 0, 0, 1],
        [1, 0, 0, 0, 1],
        [1, 0, 0, 0, 1],
        [1, 0, 0, 1, 0],
        [1, 1, 1, 0, 0],
    ];
    const I: Glyph = [
        [1, 1, 1, 1, 1],
        [0, 0, 1, 0, 0],
        [0, 0, 1, 0, 0],
        [0, 0, 1, 0, 0],
        [0, 0, 1, 0, 0],
        [0, 0, 1, 0, 0],
        [1, 1, 1, 1, 1],
    ];

    match c.to_ascii_uppercase() {
        'C' => Some(&C),
        'L' => Some(&L),
        'A' => Some(&A),
        'U' => Some(&U),
        'D' => Some(&D),
        'I' => Some(&I),
        _ => None,
    }
}

/// Copy the `1` cells of `bitmap` rows onto `grid` at `(left, top)`.
fn blit<const W: usize>(grid: &mut PixelGrid, bitmap: &[[u8; W]], left: u32, top: u32, color: Color) {
    for (y, row) in bitmap.iter().enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            if cell == 1 {
                grid.set(left + x as u32, top + y as u32, color);
            }
        }
    }
}

/// Render the heart at [`HEART_ORIGIN`], roughly centered on a 60x26 canvas.
pub fn heart(canvas: Canvas, color: Color) -> PixelGrid {
    let mut grid = PixelGrid::new(canvas);
    let (left, top) = HEART_ORIGIN;
    blit(&mut grid, &HEART[..], left, top, color);
    grid
}

/// Render `text` in the 5x7 block font. Characters without a glyph are
/// skipped without advancing; glyphs past the right edge are clipped.
pub fn text(canvas: Canvas, text: &str, color: Color) -> PixelGrid {
    let mut grid = PixelGrid::new(canvas);
    let (mut left, top) = TEXT_ORIGIN;
    for c in text.chars() {
        if let Some(g) = glyph(c) {
            blit(&mut grid, &g[..], left, top, color);
            left += GLYPH_ADVANCE;
        }
    }
    grid
}

/// Render a built-in pattern.
pub fn render(pattern: &Pattern, canvas: Canvas, color: Color) -> PixelGrid {
    match pattern {
        Pattern::Heart => heart(canvas, color),
        Pattern::Text => text(canvas, "CLAUDIA", color),
    }
}
