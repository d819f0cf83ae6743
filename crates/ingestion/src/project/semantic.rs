//! Semantic segmentation projector - class tag to palette colour
//!
//! The simulator writes the class tag into the R byte of each pixel. Tags map
//! through the CityScapes palette; tags outside the palette map to a reserved
//! colour instead of erroring, since new simulator versions add classes.

use contracts::{Channel, Frame, ImageData, PixelFormat, ViewError};

use crate::project::check_len;

/// Colour for class tags the palette does not know.
pub const UNKNOWN_CLASS_COLOR: [u8; 3] = [255, 0, 255];

/// CityScapes palette indexed by class tag.
const PALETTE: [[u8; 3]; 23] = [
    [0, 0, 0],       // 0 unlabeled
    [70, 70, 70],    // 1 building
    [100, 40, 40],   // 2 fence
    [55, 90, 80],    // 3 other
    [220, 20, 60],   // 4 pedestrian
    [153, 153, 153], // 5 pole
    [157, 234, 50],  // 6 road line
    [128, 64, 128],  // 7 road
    [244, 35, 232],  // 8 sidewalk
    [107, 142, 35],  // 9 vegetation
    [0, 0, 142],     // 10 vehicle
    [102, 102, 156], // 11 wall
    [220, 220, 0],   // 12 traffic sign
    [70, 130, 180],  // 13 sky
    [81, 0, 81],     // 14 ground
    [150, 100, 100], // 15 bridge
    [230, 150, 140], // 16 rail track
    [180, 165, 180], // 17 guard rail
    [250, 170, 30],  // 18 traffic light
    [110, 190, 160], // 19 static
    [170, 120, 50],  // 20 dynamic
    [45, 60, 150],   // 21 water
    [145, 170, 100], // 22 terrain
];

/// Remap a semantic segmentation image to palette colours.
pub(crate) fn project_semantic(
    channel: Channel,
    image: &ImageData,
    timestamp: f64,
) -> Result<Frame, ViewError> {
    check_len(channel, image)?;

    let pixel_count = image.width as usize * image.height as usize;
    let mut pixels = Vec::with_capacity(pixel_count * 3);

    for px in image.data.chunks_exact(4) {
        let tag = match image.format {
            PixelFormat::Bgra8 => px[2],
            PixelFormat::Rgba8 => px[0],
        };
        pixels.extend_from_slice(&class_color(tag));
    }

    Ok(Frame::new(channel, image.width, image.height, pixels, timestamp))
}

#[inline]
fn class_color(tag: u8) -> [u8; 3] {
    PALETTE
        .get(tag as usize)
        .copied()
        .unwrap_or(UNKNOWN_CLASS_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn tags_bgra(tags: &[u8]) -> ImageData {
        let mut data = Vec::with_capacity(tags.len() * 4);
        for &tag in tags {
            data.extend_from_slice(&[0, 0, tag, 255]);
        }
        ImageData {
            width: tags.len() as u32,
            height: 1,
            format: PixelFormat::Bgra8,
            data: Bytes::from(data),
        }
    }

    #[test]
    fn known_tags_use_palette() {
        let img = tags_bgra(&[7, 10]);
        let frame = project_semantic(Channel::Semantic, &img, 0.0).unwrap();
        assert_eq!(frame.rgb_at(0, 0), [128, 64, 128]); // road
        assert_eq!(frame.rgb_at(1, 0), [0, 0, 142]); // vehicle
    }

    #[test]
    fn unknown_tag_maps_to_reserved_color() {
        let img = tags_bgra(&[200]);
        let frame = project_semantic(Channel::Semantic, &img, 0.0).unwrap();
        assert_eq!(frame.rgb_at(0, 0), UNKNOWN_CLASS_COLOR);
    }
}
