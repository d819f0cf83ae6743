//! Depth projector - 24-bit encoded depth to logarithmic grayscale
//!
//! The simulator encodes normalized depth across the R, G, B bytes:
//! `d = (R + G*256 + B*256^2) / (256^3 - 1)`. The display ramp is the
//! logarithmic linearization `clamp(1 + ln(d) / 5.70378, 0, 1)`, which gives
//! near-field detail far more gray levels than a linear ramp would.

use contracts::{Channel, Frame, ImageData, PixelFormat, ViewError};

use crate::project::check_len;

const DEPTH_SCALE: f64 = 16_777_215.0; // 256^3 - 1
const LOG_RAMP_DIVISOR: f64 = 5.70378;

/// Remap an encoded depth image to a grayscale RGB frame.
pub(crate) fn project_depth(
    channel: Channel,
    image: &ImageData,
    timestamp: f64,
) -> Result<Frame, ViewError> {
    check_len(channel, image)?;

    let pixel_count = image.width as usize * image.height as usize;
    let mut pixels = Vec::with_capacity(pixel_count * 3);

    for px in image.data.chunks_exact(4) {
        let (r, g, b) = match image.format {
            PixelFormat::Bgra8 => (px[2], px[1], px[0]),
            PixelFormat::Rgba8 => (px[0], px[1], px[2]),
        };
        let gray = log_gray(r, g, b);
        pixels.extend_from_slice(&[gray, gray, gray]);
    }

    Ok(Frame::new(channel, image.width, image.height, pixels, timestamp))
}

#[inline]
fn log_gray(r: u8, g: u8, b: u8) -> u8 {
    let encoded = r as u32 + ((g as u32) << 8) + ((b as u32) << 16);
    if encoded == 0 {
        return 0;
    }
    let normalized = encoded as f64 / DEPTH_SCALE;
    let ramp = (1.0 + normalized.ln() / LOG_RAMP_DIVISOR).clamp(0.0, 1.0);
    (ramp * 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn encode_bgra(normalized: f64) -> [u8; 4] {
        let encoded = (normalized * DEPTH_SCALE) as u32;
        [
            ((encoded >> 16) & 0xff) as u8, // B
            ((encoded >> 8) & 0xff) as u8,  // G
            (encoded & 0xff) as u8,         // R
            255,
        ]
    }

    fn one_pixel(px: [u8; 4]) -> ImageData {
        ImageData {
            width: 1,
            height: 1,
            format: PixelFormat::Bgra8,
            data: Bytes::from(px.to_vec()),
        }
    }

    #[test]
    fn max_depth_maps_to_white() {
        let img = one_pixel(encode_bgra(1.0));
        let frame = project_depth(Channel::Depth, &img, 0.0).unwrap();
        // ln(1) == 0 -> ramp == 1.0 -> 255
        assert_eq!(frame.rgb_at(0, 0), [255, 255, 255]);
    }

    #[test]
    fn zero_depth_maps_to_black() {
        let img = one_pixel([0, 0, 0, 255]);
        let frame = project_depth(Channel::Depth, &img, 0.0).unwrap();
        assert_eq!(frame.rgb_at(0, 0), [0, 0, 0]);
    }

    #[test]
    fn ramp_is_monotonic() {
        let near = project_depth(Channel::Depth, &one_pixel(encode_bgra(0.001)), 0.0).unwrap();
        let far = project_depth(Channel::Depth, &one_pixel(encode_bgra(0.5)), 0.0).unwrap();
        assert!(near.rgb_at(0, 0)[0] < far.rgb_at(0, 0)[0]);
    }
}
