//! Emoji art preview for the terminal
//!
//! Each pixel of a composite becomes one colored square emoji, picked by
//! hue, saturation and lightness. Unlit (empty) pixels print as black
//! squares, like an LED panel that is switched off.

use crate::color::Color;
use crate::models::PixelGrid;

const BLACK: &str = "⬛";
const WHITE: &str = "⬜";
const RED: &str = "🟥";
const ORANGE: &str = "🟧";
const YELLOW: &str = "🟨";
const GREEN: &str = "🟩";
const BLUE: &str = "🟦";
const PURPLE: &str = "🟪";
const BROWN: &str = "🟫";

/// Closest emoji square for a color.
///
/// ```
/// use lightmoji::color::Color;
/// use lightmoji::emoji::color_to_emoji;
///
/// assert_eq!(color_to_emoji(Color::rgb(255, 0, 0)), "🟥");
/// assert_eq!(color_to_emoji(Color::PURPLE), "🟪");
/// assert_eq!(color_to_emoji(Color::EMPTY), "⬛");
/// ```
pub fn color_to_emoji(color: Color) -> &'static str {
    if color.is_empty() {
        return BLACK;
    }

    let (h, s, l) = rgb_to_hsl(color.r, color.g, color.b);

    if l < 0.15 {
        return BLACK;
    }
    if l > 0.85 {
        return WHITE;
    }
    if s < 0.15 {
        return if l < 0.5 { BLACK } else { WHITE };
    }
    // Dark, muted orange reads as brown
    if (0.2..0.5).contains(&l) && (15.0..50.0).contains(&h) && s < 0.7 {
        return BROWN;
    }

    match h % 360.0 {
        h if !(15.0..345.0).contains(&h) => RED,
        h if h < 45.0 => ORANGE,
        h if h < 75.0 => YELLOW,
        h if h < 165.0 => GREEN,
        h if h < 255.0 => BLUE,
        _ => PURPLE,
    }
}

/// Convert RGB to (hue degrees, saturation 0-1, lightness 0-1).
fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let l = (max + min) / 2.0;

    if delta < f32::EPSILON {
        return (0.0, 0.0, l);
    }

    let s = delta / (1.0 - (2.0 * l - 1.0).abs());
    let h = if (max - r).abs() < f32::EPSILON {
        60.0 * (((g - b) / delta) % 6.0)
    } else if (max - g).abs() < f32::EPSILON {
        60.0 * (((b - r) / delta) + 2.0)
    } else {
        60.0 * (((r - g) / delta) + 4.0)
    };

    (if h < 0.0 { h + 360.0 } else { h }, s, l)
}

/// Render a grid as emoji art, one line per row.
pub fn render_emoji_art(grid: &PixelGrid) -> String {
    let mut output = String::with_capacity(grid.canvas().area() * 4 + grid.height() as usize);
    for row in grid.rows() {
        for &color in row {
            output.push_str(color_to_emoji(color));
        }
        output.push('\n');
    }
    output
}
