//! Layer compositing
//!
//! Flattens an ordered layer stack into a single pixel grid. Layers are
//! drawn bottom to top; invisible layers are skipped; empty (black) source
//! pixels are transparent; each remaining pixel is projected through the
//! layer's offset and dropped if it lands off the canvas. Later layers
//! overwrite earlier ones outright: there is no blending and the layer
//! `opacity` value is not consulted.

use crate::models::{Canvas, Frame, Layer, PixelGrid};

/// Flatten `layers` (bottom first) onto an all-empty `canvas`.
///
/// Pure: the result depends only on the arguments.
///
/// # Examples
///
/// ```
/// use lightmoji::color::Color;
/// use lightmoji::composition::composite_layers;
/// use lightmoji::models::{Canvas, Layer};
///
/// let mut layer = Layer::new("ink");
/// layer.pixels.set(0, 0, Color::PURPLE);
/// layer.set_offset(2, 1);
///
/// let result = composite_layers(&[layer], Canvas::default());
/// assert_eq!(result.get(2, 1), Some(Color::PURPLE));
/// assert_eq!(result.get(0, 0), Some(Color::EMPTY));
/// ```
pub fn composite_layers(layers: &[Layer], canvas: Canvas) -> PixelGrid {
    let mut result = PixelGrid::new(canvas);

    for layer in layers {
        if !layer.visible {
            continue;
        }

        let dx = layer.offset_x as i64;
        let dy = layer.offset_y as i64;
        for (x, y, color) in layer.pixels.painted() {
            let tx = x as i64 + dx;
            let ty = y as i64 + dy;
            if canvas.contains(tx, ty) {
                result.set(tx as u32, ty as u32, color);
            }
        }
    }

    result
}

/// Composite a frame on the default canvas.
pub fn composite_frame(frame: &Frame) -> PixelGrid {
    composite_layers(frame.layers(), Canvas::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::models::ShiftDirection;

    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    fn small() -> Canvas {
        Canvas::new(4, 3)
    }

    fn layer_with(pixels: &[(u32, u32, Color)]) -> Layer {
        let mut layer = Layer::with_pixels("test", PixelGrid::new(small()));
        for &(x, y, c) in pixels {
            layer.pixels.set(x, y, c);
        }
        layer
    }

    #[test]
    fn test_no_layers_is_blank() {
        let result = composite_layers(&[], small());
        assert!(result.is_blank());
        assert_eq!(result.canvas(), small());
    }

    #[test]
    fn test_deterministic() {
        let layers = vec![layer_with(&[(0, 0, RED), (3, 2, BLUE)]), layer_with(&[(1, 1, BLUE)])];
        assert_eq!(composite_layers(&layers, small()), composite_layers(&layers, small()));
    }

    #[test]
    fn test_topmost_layer_wins() {
        let bottom = layer_with(&[(1, 1, RED)]);
        let top = layer_with(&[(1, 1, BLUE)]);
        let result = composite_layers(&[bottom.clone(), top.clone()], small());
        assert_eq!(result.get(1, 1), Some(BLUE));

        // Order matters, no implicit reordering
        let result = composite_layers(&[top, bottom], small());
        assert_eq!(result.get(1, 1), Some(RED));
    }

    #[test]
    fn test_empty_pixels_do_not_occlude() {
        let bottom = layer_with(&[(2, 0, RED)]);
        let top = layer_with(&[(0, 0, BLUE)]);
        let result = composite_layers(&[bottom, top], small());
        assert_eq!(result.get(2, 0), Some(RED));
        assert_eq!(result.get(0, 0), Some(BLUE));
    }

    #[test]
    fn test_opacity_is_ignored() {
        let bottom = layer_with(&[(1, 1, RED)]);
        let mut top = layer_with(&[(1, 1, BLUE)]);
        top.opacity = 0.1;
        let result = composite_layers(&[bottom, top], small());
        assert_eq!(result.get(1, 1), Some(BLUE));
    }

    #[test]
    fn test_invisible_layer_same_as_removed() {
        let bottom = layer_with(&[(1, 1, RED), (0, 2, RED)]);
        let mut hidden = layer_with(&[(1, 1, BLUE), (3, 0, BLUE)]);
        hidden.toggle_visibility();
        let top = layer_with(&[(2, 2, BLUE)]);

        let with_hidden = composite_layers(&[bottom.clone(), hidden, top.clone()], small());
        let without = composite_layers(&[bottom, top], small());
        assert_eq!(with_hidden, without);
    }

    #[test]
    fn test_offset_projection_and_drop() {
        let mut layer = layer_with(&[(0, 0, RED), (3, 2, BLUE)]);
        layer.set_offset(1, 0);
        let result = composite_layers(&[layer], small());
        assert_eq!(result.get(1, 0), Some(RED));
        assert_eq!(result.get(0, 0), Some(Color::EMPTY));
        // (3,2) + (1,0) falls off the right edge
        assert_eq!(result.painted().count(), 1);
    }

    #[test]
    fn test_negative_offset() {
        let mut layer = layer_with(&[(2, 2, RED)]);
        layer.set_offset(-2, -1);
        let result = composite_layers(&[layer], small());
        assert_eq!(result.get(0, 1), Some(RED));
    }

    #[test]
    fn test_fully_out_of_bounds_layer_is_empty() {
        let bottom = layer_with(&[(1, 1, RED)]);
        let mut far = layer_with(&[(0, 0, BLUE), (3, 2, BLUE), (1, 1, BLUE)]);
        far.set_offset(100, -100);
        let result = composite_layers(&[bottom.clone(), far], small());
        assert_eq!(result, composite_layers(&[bottom], small()));
    }

    #[test]
    fn test_extreme_offsets_do_not_overflow() {
        let mut layer = layer_with(&[(3, 2, RED)]);
        layer.set_offset(i32::MAX, i32::MIN);
        assert!(composite_layers(&[layer], small()).is_blank());
    }

    #[test]
    fn test_shift_roundtrip_restores_composite() {
        let bottom = layer_with(&[(0, 0, RED)]);
        let mut moving = layer_with(&[(1, 1, BLUE), (3, 2, BLUE)]);
        let original_pixels = moving.pixels.clone();
        let before = composite_layers(&[bottom.clone(), moving.clone()], small());

        moving.shift(ShiftDirection::Right, 3);
        moving.shift(ShiftDirection::Down, 2);
        assert_ne!(composite_layers(&[bottom.clone(), moving.clone()], small()), before);
        moving.shift(ShiftDirection::Left, 3);
        moving.shift(ShiftDirection::Up, 2);

        assert_eq!(composite_layers(&[bottom, moving.clone()], small()), before);
        assert_eq!(moving.pixels, original_pixels);
    }

    #[test]
    fn test_black_paint_is_transparent() {
        let mut layer = layer_with(&[]);
        for y in 0..3 {
            for x in 0..4 {
                layer.pixels.set(x, y, Color::rgb(0, 0, 0));
            }
        }
        let result = composite_layers(&[layer], small());
        assert_eq!(result.get(0, 0), Some(Color::EMPTY));
        assert!(result.is_blank());
    }

    #[test]
    fn test_composite_frame_uses_default_canvas() {
        let mut frame = Frame::new();
        frame.layers_mut()[0].pixels.set(59, 25, RED);
        let result = composite_frame(&frame);
        assert_eq!(result.width(), 60);
        assert_eq!(result.get(59, 25), Some(RED));
    }
}
