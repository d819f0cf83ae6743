//! Camera passthrough projector

use contracts::{Channel, Frame, ImageData, PixelFormat, ViewError};

use crate::project::check_len;

/// Interpret the buffer as H x W x 4, drop the alpha plane and reorder to RGB.
pub(crate) fn project_camera(
    channel: Channel,
    image: &ImageData,
    timestamp: f64,
) -> Result<Frame, ViewError> {
    check_len(channel, image)?;

    let pixel_count = image.width as usize * image.height as usize;
    let mut pixels = Vec::with_capacity(pixel_count * 3);

    match image.format {
        PixelFormat::Bgra8 => {
            for px in image.data.chunks_exact(4) {
                pixels.extend_from_slice(&[px[2], px[1], px[0]]);
            }
        }
        PixelFormat::Rgba8 => {
            for px in image.data.chunks_exact(4) {
                pixels.extend_from_slice(&px[..3]);
            }
        }
    }

    Ok(Frame::new(channel, image.width, image.height, pixels, timestamp))
}
