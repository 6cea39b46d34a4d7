//! GIF encoding backed by the `image` crate
//!
//! [`GifFrameEncoder`] is the default [`FrameEncoder`]: it collects frames
//! and, on `finish`, runs them through `image`'s GIF encoder, which handles
//! palette quantization, LZW compression and the container format.

use image::codecs::gif::{GifEncoder, Repeat as GifRepeat};
use image::{Delay, Frame, RgbaImage};

use crate::export::{check_dimensions, EncodeError, FrameEncoder, Repeat};

/// Convert a frame duration to the GIF delay actually stored.
///
/// GIF uses centiseconds (1/100th of a second) for delays, so durations are
/// truncated to a multiple of 10ms with a 10ms minimum.
pub fn gif_delay(duration_ms: u32) -> Delay {
    let delay_cs = (duration_ms / 10).max(1);
    Delay::from_numer_denom_ms(delay_cs * 10, 1)
}

/// Buffers frames and encodes them to an in-memory GIF.
#[derive(Default)]
pub struct GifFrameEncoder {
    frames: Vec<Frame>,
    repeat: Option<Repeat>,
}

impl GifFrameEncoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameEncoder for GifFrameEncoder {
    fn add_frame(
        &mut self,
        rgba: &[u8],
        width: u32,
        height: u32,
        delay_ms: u32,
        repeat: Option<Repeat>,
    ) -> Result<(), EncodeError> {
        check_dimensions(rgba, width, height)?;
        let image = RgbaImage::from_raw(width, height, rgba.to_vec()).ok_or(
            EncodeError::Dimensions {
                width,
                height,
                expected: width as usize * height as usize * 4,
                actual: rgba.len(),
            },
        )?;
        if repeat.is_some() {
            self.repeat = repeat;
        }
        self.frames.push(Frame::from_parts(image, 0, 0, gif_delay(delay_ms)));
        Ok(())
    }

    fn finish(&mut self) -> Result<Vec<u8>, EncodeError> {
        if self.frames.is_empty() {
            return Err(EncodeError::NoFrames);
        }

        let frames = std::mem::take(&mut self.frames);
        let mut bytes = Vec::new();
        {
            let mut encoder = GifEncoder::new(&mut bytes);
            // Without a NETSCAPE loop extension viewers play the GIF once
            if self.repeat.take() == Some(Repeat::Infinite) {
                encoder.set_repeat(GifRepeat::Infinite)?;
            }
            encoder.encode_frames(frames)?;
        }
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::export::export_animation;
    use crate::models::Animation;
    use image::codecs::gif::GifDecoder;
    use image::AnimationDecoder;
    use std::io::Cursor;

    fn solid(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
        color.iter().copied().cycle().take((width * height * 4) as usize).collect()
    }

    fn decode(bytes: &[u8]) -> Vec<Frame> {
        let decoder = GifDecoder::new(Cursor::new(bytes)).unwrap();
        decoder.into_frames().collect_frames().unwrap()
    }

    #[test]
    fn test_gif_delay_rounding() {
        assert_eq!(gif_delay(100), Delay::from_numer_denom_ms(100, 1));
        assert_eq!(gif_delay(305), Delay::from_numer_denom_ms(300, 1));
        assert_eq!(gif_delay(5), Delay::from_numer_denom_ms(10, 1));
    }

    #[test]
    fn test_encodes_valid_gif() {
        let mut encoder = GifFrameEncoder::new();
        encoder.add_frame(&solid(2, 2, [255, 0, 0, 255]), 2, 2, 100, Some(Repeat::Infinite)).unwrap();
        encoder.add_frame(&solid(2, 2, [0, 255, 0, 255]), 2, 2, 300, None).unwrap();
        let bytes = encoder.finish().unwrap();

        assert_eq!(&bytes[..6], b"GIF89a");
        let frames = decode(&bytes);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].delay(), Delay::from_numer_denom_ms(100, 1));
        assert_eq!(frames[1].delay(), Delay::from_numer_denom_ms(300, 1));
        let [r, g, b, a] = frames[0].buffer().get_pixel(0, 0).0;
        assert!(r > 200 && g < 50 && b < 50, "expected red, got {:?}", (r, g, b));
        assert_eq!(a, 255);
    }

    #[test]
    fn test_loop_extension_only_when_looping() {
        let netscape = b"NETSCAPE2.0";
        let contains = |bytes: &[u8]| bytes.windows(netscape.len()).any(|w| w == netscape);

        let mut looping = GifFrameEncoder::new();
        looping.add_frame(&solid(1, 1, [1, 2, 3, 255]), 1, 1, 100, Some(Repeat::Infinite)).unwrap();
        assert!(contains(&looping.finish().unwrap()));

        let mut once = GifFrameEncoder::new();
        once.add_frame(&solid(1, 1, [1, 2, 3, 255]), 1, 1, 100, Some(Repeat::Once)).unwrap();
        assert!(!contains(&once.finish().unwrap()));
    }

    #[test]
    fn test_rejects_bad_buffer() {
        let mut encoder = GifFrameEncoder::new();
        let result = encoder.add_frame(&[0; 3], 1, 1, 100, None);
        assert!(matches!(result, Err(EncodeError::Dimensions { .. })));
    }

    #[test]
    fn test_finish_without_frames() {
        let mut encoder = GifFrameEncoder::new();
        assert!(matches!(encoder.finish(), Err(EncodeError::NoFrames)));
    }

    #[test]
    fn test_export_animation_roundtrip() {
        let mut anim = Animation::new();
        anim.current_frame_mut().layers_mut()[0].pixels.set(0, 0, Color::rgb(255, 255, 255));
        anim.add_frame();

        let mut encoder = GifFrameEncoder::new();
        let bytes = export_animation(&anim, &mut encoder).unwrap();
        let frames = decode(&bytes);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].buffer().dimensions(), (60, 26));
        assert_eq!(frames[0].delay(), Delay::from_numer_denom_ms(200, 1));
    }
}
