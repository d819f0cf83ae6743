//! Projectors - pure payload-to-frame conversions
//!
//! One projector per channel kind, mirroring how each sensor family encodes
//! its raw buffer. Projectors are stateless: `project` never retains its input
//! and produces a fully decoded RGB24 `Frame` or a format error.

mod camera;
mod depth;
mod lidar;
mod semantic;

use contracts::{BevConfig, Channel, ChannelKind, Frame, ImageData, PayloadData, RawPayload, ViewError};

pub use lidar::{EGO_COLOR, POINT_COLOR};
pub use semantic::UNKNOWN_CLASS_COLOR;

/// Convert one raw payload into a displayable frame.
///
/// # Errors
/// `ViewError::Format` when the declared metadata is inconsistent with the
/// buffer, or the payload kind does not match the channel.
pub fn project(payload: &RawPayload, bev: &BevConfig) -> Result<Frame, ViewError> {
    match (&payload.data, payload.channel.kind()) {
        (PayloadData::Image(image), ChannelKind::Camera) => {
            camera::project_camera(payload.channel, image, payload.timestamp)
        }
        (PayloadData::Image(image), ChannelKind::Depth) => {
            depth::project_depth(payload.channel, image, payload.timestamp)
        }
        (PayloadData::Image(image), ChannelKind::Semantic) => {
            semantic::project_semantic(payload.channel, image, payload.timestamp)
        }
        (PayloadData::PointCloud(points), ChannelKind::Lidar) => {
            lidar::project_lidar(payload.channel, points, bev, payload.timestamp)
        }
        (PayloadData::Image(_), ChannelKind::Lidar) => Err(ViewError::format(
            payload.channel,
            "image payload on a point-cloud channel",
        )),
        (PayloadData::PointCloud(_), _) => Err(ViewError::format(
            payload.channel,
            "point-cloud payload on an image channel",
        )),
    }
}

/// Shared length check for image payloads.
pub(crate) fn check_len(channel: Channel, image: &ImageData) -> Result<(), ViewError> {
    let expected = image.expected_len();
    if image.data.len() != expected {
        return Err(ViewError::format(
            channel,
            format!(
                "declared {}x{}x{} = {} bytes, buffer has {}",
                image.width,
                image.height,
                image.format.bytes_per_pixel(),
                expected,
                image.data.len()
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use contracts::{PixelFormat, PointCloudData};

    #[test]
    fn kind_mismatch_is_a_format_error() {
        let payload = RawPayload {
            channel: Channel::Front,
            timestamp: 0.0,
            frame_id: None,
            data: PayloadData::PointCloud(PointCloudData {
                num_points: 0,
                point_stride: 16,
                data: Bytes::new(),
            }),
        };
        let err = project(&payload, &BevConfig::default()).unwrap_err();
        assert!(matches!(err, ViewError::Format { .. }));
    }

    #[test]
    fn undersized_image_is_rejected() {
        let payload = RawPayload {
            channel: Channel::Front,
            timestamp: 0.0,
            frame_id: None,
            data: PayloadData::Image(contracts::ImageData {
                width: 4,
                height: 4,
                format: PixelFormat::Bgra8,
                data: Bytes::from(vec![0u8; 10]),
            }),
        };
        assert!(project(&payload, &BevConfig::default()).is_err());
    }
}
